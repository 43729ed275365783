//! Reduce a login response to a [`VerificationResult`].
//!
//! The service signals "no match" through two reserved `name` values rather
//! than a status field. Those strings are known only to this module.

use facegate_types::{TransportFailure, VerificationResult};
use serde_json::Value;

const UNKNOWN_SENTINEL: &str = "Unknown";
const NOT_RECOGNISED_SENTINEL: &str = "user not recognised";

fn is_sentinel(name: &str) -> bool {
    name == UNKNOWN_SENTINEL || name == NOT_RECOGNISED_SENTINEL
}

fn malformed(detail: impl Into<String>) -> VerificationResult {
    TransportFailure::MalformedResponse {
        detail: detail.into(),
    }
    .into()
}

/// Classify the JSON body of a successful (2xx) response.
pub fn classify_body(body: Value) -> VerificationResult {
    let name = match body.get("name") {
        Some(Value::String(name)) if name.is_empty() => {
            return malformed("response `name` is empty");
        }
        Some(Value::String(name)) => name.clone(),
        Some(other) => return malformed(format!("response `name` is not a string: {other}")),
        None => return malformed("response has no `name` field"),
    };

    if is_sentinel(&name) {
        VerificationResult::Unrecognized { name }
    } else {
        VerificationResult::Recognized {
            subject_name: name,
            payload: body,
        }
    }
}

/// Classify a non-success response.
///
/// The detail is the server's `error` field when present, then the raw body
/// text, then the status reason phrase.
pub fn classify_rejection(status: u16, body: &[u8]) -> VerificationResult {
    let from_json = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| match v.get("error") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        });

    let detail = from_json
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    TransportFailure::Server { status, detail }.into()
}

/// Classify a request that never produced a response.
pub fn classify_transport_error(error: &reqwest::Error) -> VerificationResult {
    let detail = if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    };
    TransportFailure::Network { detail }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_is_unrecognized() {
        assert_eq!(
            classify_body(json!({ "name": "Unknown" })),
            VerificationResult::Unrecognized {
                name: "Unknown".into()
            }
        );
    }

    #[test]
    fn not_recognised_is_unrecognized() {
        let result = classify_body(json!({ "name": "user not recognised" }));
        assert!(matches!(result, VerificationResult::Unrecognized { .. }));
    }

    #[test]
    fn sentinel_match_is_exact() {
        // Case and spelling variants are ordinary names.
        for name in ["unknown", "UNKNOWN", "user not recognized", "Unknown "] {
            assert!(classify_body(json!({ "name": name })).is_recognized(), "{name}");
        }
    }

    #[test]
    fn recognized_keeps_full_payload() {
        let body = json!({ "name": "45CSE001", "branch": "CSE", "year": 3 });
        match classify_body(body.clone()) {
            VerificationResult::Recognized {
                subject_name,
                payload,
            } => {
                assert_eq!(subject_name, "45CSE001");
                assert_eq!(payload, body);
            }
            other => panic!("expected recognized, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_bad_name_is_malformed() {
        for body in [json!({}), json!({ "name": "" }), json!({ "name": 42 }), json!([1, 2])] {
            assert!(
                matches!(
                    classify_body(body.clone()),
                    VerificationResult::TransportFailure(TransportFailure::MalformedResponse { .. })
                ),
                "{body}"
            );
        }
    }

    #[test]
    fn rejection_uses_error_field() {
        let result = classify_rejection(400, br#"{"error":"bad image"}"#);
        assert_eq!(
            result,
            VerificationResult::TransportFailure(TransportFailure::Server {
                status: 400,
                detail: "bad image".into()
            })
        );
    }

    #[test]
    fn rejection_falls_back_to_body_text() {
        let result = classify_rejection(502, b"upstream down\n");
        match result {
            VerificationResult::TransportFailure(failure) => assert_eq!(failure.detail(), "upstream down"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_falls_back_to_reason_phrase() {
        let result = classify_rejection(500, b"");
        match result {
            VerificationResult::TransportFailure(failure) => {
                assert_eq!(failure.detail(), "Internal Server Error")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
