//! HTTP error normalization.
//!
//! Every non-success response becomes a single
//! [`PerspectiveError::ApiError`] carrying the status and the body text. The
//! Google error envelope (`{"error": {"code", "message", "status"}}`) is
//! lifted into the error details when present.

use reqwest::header::HeaderMap;

use crate::error::PerspectiveError;

/// Build the error for a non-success response.
pub fn classify_http_error(status: u16, body_text: &str, headers: &HeaderMap) -> PerspectiveError {
    fn header_val(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }
    let id_keys = ["x-request-id", "x-goog-request-id", "traceparent"];
    let request_ids: Vec<String> = id_keys
        .iter()
        .filter_map(|k| header_val(headers, k).map(|v| format!("{k}={v}")))
        .collect();

    let body_desc = if body_text.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body_text.to_string()
    };
    let message = format!("Perspective API error: HTTP {status} - {body_desc}");

    let details = match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json) => {
            let envelope = json.get("error");
            let reason = envelope
                .and_then(|e| e.get("status"))
                .and_then(|s| s.as_str())
                .map(str::to_string);
            let service_message = envelope
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string);
            serde_json::json!({
                "status": status,
                "reason": reason,
                "service_message": service_message,
                "response": json,
                "request_ids": request_ids,
            })
        }
        Err(_) => serde_json::json!({
            "status": status,
            "raw": body_text,
            "request_ids": request_ids,
        }),
    };

    PerspectiveError::api_error_with_details(status, message, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn google_envelope_is_lifted_into_details() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_http_error(400, body, &HeaderMap::new());
        match err {
            PerspectiveError::ApiError {
                code,
                message,
                details,
            } => {
                assert_eq!(code, 400);
                assert!(message.starts_with("Perspective API error: HTTP 400 - "));
                assert!(message.contains("API key not valid."));
                let details = details.expect("details");
                assert_eq!(details["reason"], "INVALID_ARGUMENT");
                assert_eq!(details["service_message"], "API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_text_body_is_kept_raw() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let err = classify_http_error(503, "upstream unavailable", &headers);
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_server_error());
        match err {
            PerspectiveError::ApiError { details, .. } => {
                let details = details.expect("details");
                assert_eq!(details["raw"], "upstream unavailable");
                assert_eq!(details["request_ids"][0], "x-request-id=abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_falls_back_to_status_line() {
        let err = classify_http_error(429, "", &HeaderMap::new());
        assert_eq!(
            err.to_string(),
            "API error 429: Perspective API error: HTTP 429 - HTTP 429"
        );
    }
}
