use serde_json::{Map, Value};

use crate::features::attachments::dtos::FlagDto;
use crate::features::attachments::models::CustomFlag;

/// Writes tracker-specific flag fields into the attachment request object
pub trait FlagEncoder: Send + Sync {
    fn encode(&self, flags: &[CustomFlag]) -> serde_json::Result<Map<String, Value>>;
}

/// Bugzilla's `flags` array: `[{"name": ..., "status": ..., "requestee": ...}]`
#[derive(Debug, Clone, Copy, Default)]
pub struct BugzillaFlagEncoder;

impl FlagEncoder for BugzillaFlagEncoder {
    fn encode(&self, flags: &[CustomFlag]) -> serde_json::Result<Map<String, Value>> {
        let entries: Vec<FlagDto<'_>> = flags
            .iter()
            .filter(|flag| flag.is_set())
            .map(|flag| FlagDto {
                name: &flag.name,
                status: flag.value.trim(),
                requestee: flag.requestee.as_deref().filter(|r| !r.is_empty()),
            })
            .collect();

        let mut fields = Map::new();
        if !entries.is_empty() {
            fields.insert("flags".to_string(), serde_json::to_value(entries)?);
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encodes_flags_in_order() {
        let flags = vec![
            CustomFlag::new("review", "?").with_requestee("dev@example.org"),
            CustomFlag::new("approval", "+"),
        ];
        let fields = BugzillaFlagEncoder.encode(&flags).unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({
                "flags": [
                    {"name": "review", "status": "?", "requestee": "dev@example.org"},
                    {"name": "approval", "status": "+"}
                ]
            })
        );
    }

    #[test]
    fn test_unset_flags_are_skipped() {
        let flags = vec![CustomFlag::new("review", " ")];
        let fields = BugzillaFlagEncoder.encode(&flags).unwrap();
        assert!(fields.is_empty());
    }
}
