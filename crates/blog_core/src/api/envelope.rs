//! Uniform response envelope.

use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

/// Response returned by every handler: status, headers, JSON body text and
/// the base64 flag (always `false` here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl Envelope {
    /// JSON response with the shared CORS and content-type headers.
    ///
    /// Falls back to a 500 envelope if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::with_json_body(status_code, body),
            Err(err) => {
                error!(
                    "event=envelope_encode module=api status=error error_code=serialize_failed error={}",
                    err
                );
                Self::internal_error()
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::with_json_body(status_code, json!({ "error": message }).to_string())
    }

    pub fn bad_request(message: &str) -> Self {
        Self::error(400, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::error(404, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::error(405, "Method not allowed")
    }

    /// Generic 500; the cause is logged by the caller, never returned.
    pub fn internal_error() -> Self {
        Self::error(500, "Internal server error")
    }

    /// Empty-bodied CORS preflight answer for an endpoint accepting `verb`.
    pub fn preflight(verb: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN_HEADER.to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            format!("{verb}, OPTIONS"),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            CONTENT_TYPE_HEADER.to_string(),
        );
        headers.insert(
            "Access-Control-Max-Age".to_string(),
            PREFLIGHT_MAX_AGE_SECS.to_string(),
        );
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    fn with_json_body(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            CONTENT_TYPE_HEADER.to_string(),
            JSON_CONTENT_TYPE.to_string(),
        );
        headers.insert(ALLOW_ORIGIN_HEADER.to_string(), "*".to_string());
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parses the body back into JSON. Mostly useful to callers and tests.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_carries_json_and_cors_headers() {
        let envelope = Envelope::not_found("Article not found");
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.header(CONTENT_TYPE_HEADER), Some(JSON_CONTENT_TYPE));
        assert_eq!(envelope.header(ALLOW_ORIGIN_HEADER), Some("*"));
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({"error": "Article not found"})
        );
        assert!(!envelope.is_base64_encoded);
    }

    #[test]
    fn preflight_is_empty_and_has_no_content_type() {
        let envelope = Envelope::preflight("POST");
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.body.is_empty());
        assert_eq!(envelope.header(CONTENT_TYPE_HEADER), None);
        assert_eq!(envelope.header(ALLOW_ORIGIN_HEADER), Some("*"));
        assert_eq!(
            envelope.header("Access-Control-Allow-Methods"),
            Some("POST, OPTIONS")
        );
        assert_eq!(envelope.header("Access-Control-Max-Age"), Some("86400"));
    }

    #[test]
    fn serializes_with_serverless_field_names() {
        let value = serde_json::to_value(Envelope::method_not_allowed()).unwrap();
        assert_eq!(value["statusCode"], 405);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["body"], r#"{"error":"Method not allowed"}"#);
    }
}
