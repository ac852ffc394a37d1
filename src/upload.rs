//! Upload boundary: turns an HTTP status and body into a decoded response.
//!
//! Shared by the browser runtime (fetch) and the native client (reqwest), so
//! both classify outcomes identically.

use serde_json::Value;

use crate::error::UploadError;
use crate::model::{decode_value, ClassificationResponse};

/// Interpret a completed HTTP exchange.
///
/// - 2xx: the body must decode into one of the accepted shapes.
/// - Otherwise: a JSON `{ "error": ... }` body is surfaced as an application
///   error (the backend reports rejected uploads that way); anything else is a
///   transport error carrying the status.
pub fn interpret(status: u16, body: &str) -> Result<ClassificationResponse, UploadError> {
    if (200..300).contains(&status) {
        let value: Value = serde_json::from_str(body)?;
        return decode_value(value);
    }

    match serde_json::from_str::<Value>(body).map(decode_value) {
        Ok(Ok(failure @ ClassificationResponse::Failed(_))) => {
            log::debug!("Server returned {} with an error body", status);
            Ok(failure)
        }
        _ => Err(UploadError::Http { status }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let response = interpret(200, r#"{"predictions":[{"label":"cat","score":0.9}]}"#).unwrap();
        assert!(matches!(response, ClassificationResponse::Classified(_)));
    }

    #[test]
    fn test_application_error_with_ok_status() {
        let response = interpret(200, r#"{"error":"Model is currently loading."}"#).unwrap();
        assert!(matches!(response, ClassificationResponse::Failed(_)));
    }

    #[test]
    fn test_error_status_with_json_error_body() {
        let response = interpret(413, r#"{"error":"File too large. Maximum size is 16MB."}"#).unwrap();
        let ClassificationResponse::Failed(failure) = response else {
            panic!("expected failure");
        };
        assert_eq!(failure.error, "File too large. Maximum size is 16MB.");
    }

    #[test]
    fn test_error_status_without_usable_body() {
        assert_eq!(
            interpret(502, "<html>Bad Gateway</html>"),
            Err(UploadError::Http { status: 502 })
        );
        assert_eq!(interpret(500, ""), Err(UploadError::Http { status: 500 }));
        // A success-shaped body does not turn an error status into success.
        assert_eq!(
            interpret(500, r#"{"predictions":[]}"#),
            Err(UploadError::Http { status: 500 })
        );
    }

    #[test]
    fn test_ok_status_with_broken_body() {
        assert!(matches!(interpret(200, "not json"), Err(UploadError::Json(_))));
        assert_eq!(interpret(204, r#"{"ok":true}"#), Err(UploadError::InvalidFormat));
    }
}
