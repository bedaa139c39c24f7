mod flag_encoder;
mod request_builder;
mod response_classifier;

pub use flag_encoder::{BugzillaFlagEncoder, FlagEncoder};
pub use request_builder::{attachment_path, AttachmentRequest, AttachmentRequestBuilder};
pub use response_classifier::{classify_response, status_text};
