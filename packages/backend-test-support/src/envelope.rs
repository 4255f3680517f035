//! Envelope test helpers for backend testing
//!
//! Every response body carries `status: "success" | "error"`. These helpers
//! assert that contract from raw response parts without depending on backend
//! types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Local mirror of the backend's error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelopeLike {
    status: String,
    message: String,
    code: String,
    trace_id: String,
}

/// Parse a body as JSON, panicking with the raw text on failure.
pub fn parse_json(body_bytes: &[u8]) -> Value {
    serde_json::from_slice(body_bytes).unwrap_or_else(|e| {
        panic!(
            "Response body should be valid JSON ({e}): {}",
            String::from_utf8_lossy(body_bytes)
        )
    })
}

/// Assert a success envelope and return the parsed body for further checks.
pub fn assert_success(status: StatusCode, body_bytes: &[u8]) -> Value {
    let json = parse_json(body_bytes);
    assert_eq!(status, StatusCode::OK, "unexpected status, body: {json}");
    assert_eq!(json["status"], "success", "unexpected body: {json}");
    json
}

/// Assert that response parts conform to the error envelope contract
///
/// Validates:
/// - HTTP status is 500
/// - `x-trace-id` header exists and matches body `trace_id`
/// - `code` matches and `message` contains the expected fragment
pub fn assert_error_envelope(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_message_contains: Option<&str>,
) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let envelope: ErrorEnvelopeLike = serde_json::from_slice(body_bytes)
        .expect("Response body should be a valid error envelope");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert_eq!(
        envelope.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(envelope.status, "error");
    assert_eq!(envelope.code, expected_code);

    if let Some(expected) = expected_message_contains {
        assert!(
            envelope.message.contains(expected),
            "Expected message to contain '{}', but got '{}'",
            expected,
            envelope.message
        );
    }
}
