use std::io::{self, Cursor};
use std::sync::Arc;

use super::{AttachmentSource, SourceStream};

/// Attachment content already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    content_type: String,
    description: Option<String>,
    data: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        let data: Vec<u8> = data.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            description: None,
            data: Arc::from(data),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl AttachmentSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn open(&self) -> io::Result<Box<dyn SourceStream>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}

impl SourceStream for Cursor<Arc<[u8]>> {}
