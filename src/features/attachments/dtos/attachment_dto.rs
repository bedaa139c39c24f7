use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::credentials::AuthFields;

/// Request body for `POST /bug/{id}/attachment`.
/// Field order is the order written on the wire.
#[derive(Debug, Serialize)]
pub struct CreateAttachmentRequestDto<'a> {
    #[serde(flatten)]
    pub auth: AuthFields<'a>,
    pub ids: [u64; 1],
    pub is_patch: bool,
    pub summary: &'a str,
    pub content_type: &'a str,
    /// Base64 of the attachment content
    pub data: String,
    pub file_name: &'a str,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    /// Tracker-specific fields such as `flags`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Success body: ids of the attachments the server created
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIdsResponseDto {
    pub ids: Vec<u64>,
}

/// Error body returned alongside 4xx replies
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponseDto {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// One entry of the `flags` array
#[derive(Debug, Serialize)]
pub struct FlagDto<'a> {
    pub name: &'a str,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestee: Option<&'a str>,
}
