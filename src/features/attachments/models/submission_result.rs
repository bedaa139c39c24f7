use crate::core::error::{BugzillaRestError, Result};

/// Outcome of one attachment POST as classified from the server reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { created_ids: Vec<u64> },
    Failure { http_status: u16, message: String },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    /// Turn a failure into the typed error for its status
    pub fn into_result(self) -> Result<Vec<u64>> {
        match self {
            SubmissionResult::Success { created_ids } => Ok(created_ids),
            SubmissionResult::Failure {
                http_status: 200 | 201,
                message,
            } => Err(BugzillaRestError::Decode(message)),
            SubmissionResult::Failure {
                http_status: 400,
                message,
            } => Err(BugzillaRestError::ServerRejected { message }),
            SubmissionResult::Failure {
                http_status: 404,
                message,
            } => Err(BugzillaRestError::ResourceNotFound(message)),
            SubmissionResult::Failure {
                http_status,
                message,
            } => Err(BugzillaRestError::UnexpectedStatus {
                status: http_status,
                message,
            }),
        }
    }
}
