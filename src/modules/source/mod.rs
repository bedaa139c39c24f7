//! Byte sources that supply attachment content
//!
//! A source reports the metadata it knows about (name, content type,
//! description) and hands out a stream that must be closed explicitly,
//! so close failures can be reported instead of silently dropped.

mod file_source;
mod memory_source;

use std::io::{self, Read};

use crate::core::error::{Result, StreamError};

pub use file_source::FileSource;
pub use memory_source::MemorySource;

/// Readable stream with an explicit, fallible close
pub trait SourceStream: Read + Send {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

/// Content of an attachment plus what the source knows about it
pub trait AttachmentSource: Send + Sync {
    fn name(&self) -> &str;

    fn content_type(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    fn open(&self) -> io::Result<Box<dyn SourceStream>>;
}

/// Read the whole source into memory, closing the stream on every path.
pub fn read_source(source: &dyn AttachmentSource) -> Result<Vec<u8>> {
    let mut stream = source.open().map_err(|e| {
        tracing::error!("Failed to open attachment source '{}': {}", source.name(), e);
        StreamError::Read {
            source: e,
            close_error: None,
        }
    })?;

    let mut buffer = Vec::new();
    let read_result = stream.read_to_end(&mut buffer);
    let close_result = stream.close();

    match (read_result, close_result) {
        (Ok(len), Ok(())) => {
            tracing::debug!("Read {} bytes from attachment source '{}'", len, source.name());
            Ok(buffer)
        }
        (Ok(_), Err(close_error)) => {
            tracing::error!(
                "Failed to close attachment source '{}': {}",
                source.name(),
                close_error
            );
            Err(StreamError::Close(close_error).into())
        }
        (Err(read_error), close_result) => {
            tracing::error!(
                "Failed to read attachment source '{}': {}",
                source.name(),
                read_error
            );
            Err(StreamError::Read {
                source: read_error,
                close_error: close_result.err(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BugzillaRestError;

    /// Stream whose read and close outcomes are scripted
    struct ScriptedStream {
        fail_read: bool,
        fail_close: bool,
        served: bool,
    }

    impl Read for ScriptedStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fail_read {
                return Err(io::Error::other("read broke"));
            }
            if self.served || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = b'x';
            self.served = true;
            Ok(1)
        }
    }

    impl SourceStream for ScriptedStream {
        fn close(self: Box<Self>) -> io::Result<()> {
            if self.fail_close {
                Err(io::Error::other("close broke"))
            } else {
                Ok(())
            }
        }
    }

    struct ScriptedSource {
        fail_open: bool,
        fail_read: bool,
        fail_close: bool,
    }

    impl AttachmentSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted.bin"
        }

        fn content_type(&self) -> &str {
            "application/octet-stream"
        }

        fn open(&self) -> io::Result<Box<dyn SourceStream>> {
            if self.fail_open {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such source"));
            }
            Ok(Box::new(ScriptedStream {
                fail_read: self.fail_read,
                fail_close: self.fail_close,
                served: false,
            }))
        }
    }

    fn scripted(fail_open: bool, fail_read: bool, fail_close: bool) -> ScriptedSource {
        ScriptedSource {
            fail_open,
            fail_read,
            fail_close,
        }
    }

    #[test]
    fn test_reads_everything() {
        let bytes = read_source(&scripted(false, false, false)).unwrap();
        assert_eq!(bytes, b"x");
    }

    #[test]
    fn test_open_failure_is_read_error() {
        let err = read_source(&scripted(true, false, false)).unwrap_err();
        match err {
            BugzillaRestError::Stream(StreamError::Read {
                source,
                close_error,
            }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
                assert!(close_error.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_close_failure_after_good_read() {
        let err = read_source(&scripted(false, false, true)).unwrap_err();
        assert!(matches!(
            err,
            BugzillaRestError::Stream(StreamError::Close(_))
        ));
    }

    #[test]
    fn test_close_failure_does_not_mask_read_failure() {
        let err = read_source(&scripted(false, true, true)).unwrap_err();
        match err {
            BugzillaRestError::Stream(StreamError::Read {
                source,
                close_error,
            }) => {
                assert_eq!(source.to_string(), "read broke");
                assert_eq!(close_error.unwrap().to_string(), "close broke");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
