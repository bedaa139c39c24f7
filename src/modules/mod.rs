//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the byte sources attachments are read from.

pub mod source;
