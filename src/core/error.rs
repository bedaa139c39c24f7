use std::fmt;
use std::io;

use thiserror::Error;

/// Failure while pulling attachment bytes out of a source
#[derive(Debug, Error)]
pub enum StreamError {
    /// Opening or reading the source failed. A failure to close the stream
    /// afterwards is kept alongside instead of replacing the read error.
    #[error("Could not get stream from attachment source: {source}{}", CloseSuffix(.close_error))]
    Read {
        #[source]
        source: io::Error,
        close_error: Option<io::Error>,
    },

    #[error("Could not close stream from attachment source: {0}")]
    Close(#[source] io::Error),
}

struct CloseSuffix<'a>(&'a Option<io::Error>);

impl fmt::Display for CloseSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(e) => write!(f, " (closing the stream also failed: {})", e),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum BugzillaRestError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("Could not create request entity: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Server rejected attachment: {message}")]
    ServerRejected { message: String },

    #[error("Unexpected response (HTTP {status}): {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Could not decode server response: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background read of attachment source did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl BugzillaRestError {
    /// HTTP status this error was classified from, if it came from a server reply
    pub fn http_status(&self) -> Option<u16> {
        match self {
            BugzillaRestError::ResourceNotFound(_) => Some(404),
            BugzillaRestError::ServerRejected { .. } => Some(400),
            BugzillaRestError::UnexpectedStatus { status, .. } => Some(*status),
            BugzillaRestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for BugzillaRestError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        BugzillaRestError::Validation(messages.join("; "))
    }
}

pub type Result<T> = std::result::Result<T, BugzillaRestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_keeps_close_error_in_message() {
        let err = StreamError::Read {
            source: io::Error::other("disk gone"),
            close_error: Some(io::Error::other("handle stale")),
        };
        let msg = err.to_string();
        assert!(msg.contains("disk gone"));
        assert!(msg.contains("handle stale"));
    }

    #[test]
    fn test_read_error_without_close_error() {
        let err = StreamError::Read {
            source: io::Error::other("disk gone"),
            close_error: None,
        };
        assert_eq!(
            err.to_string(),
            "Could not get stream from attachment source: disk gone"
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            BugzillaRestError::ResourceNotFound("x".into()).http_status(),
            Some(404)
        );
        assert_eq!(
            BugzillaRestError::UnexpectedStatus {
                status: 503,
                message: "x".into()
            }
            .http_status(),
            Some(503)
        );
        assert_eq!(BugzillaRestError::Validation("x".into()).http_status(), None);
    }
}
