use reqwest::StatusCode;

use crate::features::attachments::dtos::{CreatedIdsResponseDto, ErrorResponseDto};
use crate::features::attachments::models::SubmissionResult;

/// Classify the reply to an attachment POST.
///
/// `path` is the request path, used in messages for 404 and unexpected statuses.
pub fn classify_response(status: u16, path: &str, body: &[u8]) -> SubmissionResult {
    match status {
        200 | 201 => match serde_json::from_slice::<CreatedIdsResponseDto>(body) {
            Ok(created) => SubmissionResult::Success {
                created_ids: created.ids,
            },
            Err(e) => SubmissionResult::Failure {
                http_status: status,
                message: format!("Malformed response from '{}': {}", path, e),
            },
        },
        400 => {
            let message = match serde_json::from_slice::<ErrorResponseDto>(body) {
                Ok(error) => {
                    tracing::debug!(
                        "Server rejected attachment for '{}' (code {:?}, documentation {:?})",
                        path,
                        error.code,
                        error.documentation
                    );
                    error.message
                }
                Err(e) => format!(
                    "{} from '{}' with unreadable error body: {}",
                    status_text(status),
                    path,
                    e
                ),
            };
            SubmissionResult::Failure {
                http_status: status,
                message,
            }
        }
        404 => SubmissionResult::Failure {
            http_status: status,
            message: format!("Requested resource '{}' does not exist", path),
        },
        _ => SubmissionResult::Failure {
            http_status: status,
            message: format!(
                "Unexpected response from Bugzilla REST server for '{}': {}",
                path,
                status_text(status)
            ),
        },
    }
}

/// "500 Internal Server Error", or just the code when it has no canonical reason
pub fn status_text(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BugzillaRestError;

    const PATH: &str = "/rest/bug/42/attachment";

    #[test]
    fn test_created_ids() {
        let result = classify_response(201, PATH, br#"{"ids":[42]}"#);
        assert_eq!(
            result,
            SubmissionResult::Success {
                created_ids: vec![42]
            }
        );
        assert_eq!(result.into_result().unwrap(), vec![42]);
    }

    #[test]
    fn test_ok_is_success_too() {
        let result = classify_response(200, PATH, br#"{"ids":[1,2]}"#);
        assert_eq!(result.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_not_found_names_path() {
        let err = classify_response(404, PATH, b"").into_result().unwrap_err();
        match err {
            BugzillaRestError::ResourceNotFound(msg) => assert!(msg.contains(PATH)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_carries_server_message() {
        let err = classify_response(400, PATH, br#"{"message":"bad request"}"#)
            .into_result()
            .unwrap_err();
        match err {
            BugzillaRestError::ServerRejected { message } => assert_eq!(message, "bad request"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_with_full_bugzilla_error_body() {
        let body = br#"{"error":true,"code":600,"message":"You must provide a summary","documentation":"https://bugzilla.readthedocs.org/"}"#;
        let err = classify_response(400, PATH, body).into_result().unwrap_err();
        assert!(matches!(
            err,
            BugzillaRestError::ServerRejected { ref message } if message == "You must provide a summary"
        ));
    }

    #[test]
    fn test_bad_request_with_garbage_body_is_still_rejected() {
        let err = classify_response(400, PATH, b"<html>oops</html>")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BugzillaRestError::ServerRejected { .. }));
    }

    #[test]
    fn test_server_error_is_unexpected_status() {
        let err = classify_response(500, PATH, b"").into_result().unwrap_err();
        match err {
            BugzillaRestError::UnexpectedStatus { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
                assert!(message.contains(PATH));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = classify_response(201, PATH, b"{\"ids\":")
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BugzillaRestError::Decode(_)));
    }

    #[test]
    fn test_status_text_without_reason() {
        assert_eq!(status_text(599), "599");
        assert_eq!(status_text(503), "503 Service Unavailable");
    }
}
