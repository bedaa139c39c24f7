use validator::Validate;

use crate::core::error::Result;
use crate::modules::source::{read_source, AttachmentSource};

/// Tracker-specific flag set on a new attachment, e.g. `review` = `?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFlag {
    pub name: String,
    /// Flag status such as `?`, `+` or `-`. Blank means unset.
    pub value: String,
    pub requestee: Option<String>,
}

impl CustomFlag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            requestee: None,
        }
    }

    pub fn with_requestee(mut self, requestee: impl Into<String>) -> Self {
        self.requestee = Some(requestee.into());
        self
    }

    pub fn is_set(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Caller-supplied values that win over what the byte source reports
#[derive(Debug, Clone, Default)]
pub struct AttachmentOverrides {
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub is_patch: Option<bool>,
    pub is_private: Option<bool>,
}

/// Accumulates attachment metadata and validates it before any content is read
#[derive(Debug, Clone, Default, Validate)]
pub struct SubmissionBuilder {
    #[validate(range(min = 1, message = "Bug id must be a positive number"))]
    bug_id: u64,

    comment: Option<String>,

    #[validate(required(message = "Description required when submitting attachments"))]
    description: Option<String>,

    #[validate(required(message = "Content type required when submitting attachments"))]
    content_type: Option<String>,

    #[validate(required(message = "File name required when submitting attachments"))]
    file_name: Option<String>,

    is_patch: bool,
    is_private: bool,
    custom_flags: Vec<CustomFlag>,
}

impl SubmissionBuilder {
    pub fn new(bug_id: u64) -> Self {
        Self {
            bug_id,
            ..Default::default()
        }
    }

    /// Start from the metadata the source knows about
    pub fn for_source(bug_id: u64, source: &dyn AttachmentSource) -> Self {
        let mut builder = Self::new(bug_id)
            .content_type(source.content_type())
            .file_name(source.name());
        if let Some(description) = source.description() {
            builder = builder.description(description);
        }
        builder
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_blank(comment.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = non_blank(content_type.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = non_blank(file_name.into());
        self
    }

    pub fn patch(mut self, is_patch: bool) -> Self {
        self.is_patch = is_patch;
        self
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Add a flag; a flag with the same name is replaced in place
    pub fn flag(mut self, flag: CustomFlag) -> Self {
        match self.custom_flags.iter_mut().find(|f| f.name == flag.name) {
            Some(existing) => *existing = flag,
            None => self.custom_flags.push(flag),
        }
        self
    }

    pub fn flags(self, flags: impl IntoIterator<Item = CustomFlag>) -> Self {
        flags.into_iter().fold(self, |builder, flag| builder.flag(flag))
    }

    pub fn apply_overrides(mut self, overrides: &AttachmentOverrides) -> Self {
        if let Some(description) = &overrides.description {
            self = self.description(description.as_str());
        }
        if let Some(content_type) = &overrides.content_type {
            self = self.content_type(content_type.as_str());
        }
        if let Some(file_name) = &overrides.file_name {
            self = self.file_name(file_name.as_str());
        }
        if let Some(is_patch) = overrides.is_patch {
            self.is_patch = is_patch;
        }
        if let Some(is_private) = overrides.is_private {
            self.is_private = is_private;
        }
        self
    }

    /// Check the metadata without touching any content
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }

    pub fn build(self, data: Vec<u8>) -> Result<AttachmentSubmission> {
        self.validate()?;

        Ok(AttachmentSubmission {
            bug_id: self.bug_id,
            comment: self.comment,
            description: self.description.unwrap_or_default(),
            content_type: self.content_type.unwrap_or_default(),
            file_name: self.file_name.unwrap_or_default(),
            is_patch: self.is_patch,
            is_private: self.is_private,
            data,
            custom_flags: self.custom_flags,
        })
    }

    /// Validate, then buffer the whole source. Invalid metadata never opens the source.
    pub fn build_from_source(self, source: &dyn AttachmentSource) -> Result<AttachmentSubmission> {
        self.check()?;
        let data = read_source(source)?;
        self.build(data)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// One validated attachment, ready to be encoded and sent once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSubmission {
    bug_id: u64,
    comment: Option<String>,
    description: String,
    content_type: String,
    file_name: String,
    is_patch: bool,
    is_private: bool,
    data: Vec<u8>,
    custom_flags: Vec<CustomFlag>,
}

impl AttachmentSubmission {
    pub fn bug_id(&self) -> u64 {
        self.bug_id
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_patch(&self) -> bool {
        self.is_patch
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn custom_flags(&self) -> &[CustomFlag] {
        &self.custom_flags
    }
}
