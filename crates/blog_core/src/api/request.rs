//! Incoming request shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP-like request handed to an endpoint handler.
///
/// Serialized field names follow the serverless event format
/// (`httpMethod`, `queryStringParameters`, `body`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// Missing method falls back to the endpoint's own verb.
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Raw request body; JSON for the comment endpoint.
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the request method, or `default` when none was supplied.
    pub fn method_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.http_method.as_deref().unwrap_or(default)
    }

    /// Returns one query parameter value.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiRequest;

    #[test]
    fn deserializes_serverless_event_shape() {
        let request: ApiRequest = serde_json::from_str(
            r#"{"httpMethod":"GET","queryStringParameters":{"id":"4"},"body":null}"#,
        )
        .unwrap();
        assert_eq!(request.method_or("POST"), "GET");
        assert_eq!(request.query_param("id"), Some("4"));
        assert_eq!(request.body, None);
    }

    #[test]
    fn missing_fields_default_to_none() {
        let request: ApiRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.method_or("GET"), "GET");
        assert_eq!(request.query_param("id"), None);
    }
}
