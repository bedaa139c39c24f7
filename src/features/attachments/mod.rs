//! New-attachment submission for Bugzilla's REST API
//!
//! Metadata is validated by [`models::SubmissionBuilder`], encoded by
//! [`services::AttachmentRequestBuilder`], posted by
//! [`clients::BugzillaRestClient`] and the reply is classified by
//! [`services::classify_response`].

pub mod clients;
pub mod dtos;
pub mod models;
pub mod services;

pub use clients::BugzillaRestClient;
pub use models::{
    AttachmentOverrides, AttachmentSubmission, CustomFlag, SubmissionBuilder, SubmissionResult,
};
pub use services::{AttachmentRequestBuilder, BugzillaFlagEncoder, FlagEncoder};
