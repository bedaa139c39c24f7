mod submission;
mod submission_result;

pub use submission::{AttachmentOverrides, AttachmentSubmission, CustomFlag, SubmissionBuilder};
pub use submission_result::SubmissionResult;
