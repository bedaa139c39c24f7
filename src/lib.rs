//! Submit attachments to Bugzilla bug reports over the REST API.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
