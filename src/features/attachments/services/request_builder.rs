use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::error::Result;
use crate::features::attachments::dtos::CreateAttachmentRequestDto;
use crate::features::attachments::models::AttachmentSubmission;
use crate::shared::credentials::Credentials;

use super::flag_encoder::{BugzillaFlagEncoder, FlagEncoder};

/// Encoded attachment POST, ready for the transport
#[derive(Debug, Clone)]
pub struct AttachmentRequest {
    /// Path relative to the REST root, e.g. `/bug/42/attachment`
    pub path: String,
    /// UTF-8 JSON document
    pub body: String,
}

/// Keys the request body always owns; encoders may not write these
const RESERVED_KEYS: [&str; 11] = [
    "Bugzilla_login",
    "Bugzilla_password",
    "Bugzilla_api_key",
    "ids",
    "is_patch",
    "summary",
    "content_type",
    "data",
    "file_name",
    "is_private",
    "comment",
];

pub fn attachment_path(bug_id: u64) -> String {
    format!("/bug/{}/attachment", bug_id)
}

/// Builds the JSON body for new attachments
#[derive(Clone)]
pub struct AttachmentRequestBuilder {
    credentials: Credentials,
    flag_encoder: Arc<dyn FlagEncoder>,
}

impl AttachmentRequestBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_flag_encoder(credentials, Arc::new(BugzillaFlagEncoder))
    }

    pub fn with_flag_encoder(credentials: Credentials, flag_encoder: Arc<dyn FlagEncoder>) -> Self {
        Self {
            credentials,
            flag_encoder,
        }
    }

    pub fn build(&self, submission: &AttachmentSubmission) -> Result<AttachmentRequest> {
        let data = STANDARD.encode(submission.data());
        let mut extra = self.flag_encoder.encode(submission.custom_flags())?;
        extra.retain(|key, _| {
            let reserved = RESERVED_KEYS.contains(&key.as_str());
            if reserved {
                tracing::warn!("Ignoring flag field '{}': it would overwrite a request field", key);
            }
            !reserved
        });

        let dto = CreateAttachmentRequestDto {
            auth: self.credentials.auth_fields(),
            ids: [submission.bug_id()],
            is_patch: submission.is_patch(),
            summary: submission.description(),
            content_type: submission.content_type(),
            data,
            file_name: submission.file_name(),
            is_private: submission.is_private(),
            comment: submission.comment(),
            extra,
        };

        let body = serde_json::to_string(&dto)?;

        tracing::debug!(
            "Built attachment request for bug {}: file={}, content_type={}, {} bytes, {} flags",
            submission.bug_id(),
            submission.file_name(),
            submission.content_type(),
            submission.data().len(),
            submission.custom_flags().len()
        );

        Ok(AttachmentRequest {
            path: attachment_path(submission.bug_id()),
            body,
        })
    }
}
