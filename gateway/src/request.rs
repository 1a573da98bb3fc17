//! Parsed inbound request handed to vendor route modules. Validation helpers
//! return ready-to-send 4xx replies so handlers can use `?` and reject bad
//! input before any outbound call is made.

use crate::respond::{self, Reply};
use hyper::{Method, StatusCode};
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub struct ApiRequest {
    pub method: Method,
    /// Path segments after `/api/{vendor}/`.
    pub segments: Vec<String>,
    pub query: IndexMap<String, String>,
    pub body: Option<Value>,
    /// Inbound `Authorization: Bearer` token, if any.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// The request body as a JSON object, or a 400 reply.
    pub fn object(&self) -> Result<&Map<String, Value>, Reply> {
        self.body
            .as_ref()
            .and_then(Value::as_object)
            .ok_or_else(|| respond::bad_request("request body must be a JSON object"))
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn require_query(&self, key: &str) -> Result<&str, Reply> {
        self.query_param(key)
            .ok_or_else(|| respond::bad_request(&format!("missing required query parameter: {key}")))
    }

    pub fn require_bearer(&self) -> Result<&str, Reply> {
        self.bearer.as_deref().ok_or_else(|| {
            respond::error(StatusCode::UNAUTHORIZED, "missing bearer token")
        })
    }
}

/// A required string field from the body object, or a 400 naming the field.
pub fn require_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, Reply> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| respond::bad_request(&format!("missing required field: {key}")))
}

pub fn optional_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method: Method::POST,
            segments: vec![],
            query: IndexMap::new(),
            body,
            bearer: None,
        }
    }

    #[test]
    fn object_rejects_missing_and_non_object_bodies() {
        assert!(request(None).object().is_err());
        assert!(request(Some(json!([1, 2]))).object().is_err());
        assert!(request(Some(json!({"a": 1}))).object().is_ok());
    }

    #[test]
    fn require_str_rejects_absent_and_empty() {
        let object = json!({"channel": "C1", "text": ""});
        let object = object.as_object().unwrap();
        assert_eq!(require_str(object, "channel").unwrap(), "C1");
        assert!(require_str(object, "text").is_err());
        assert!(require_str(object, "missing").is_err());
    }

    #[test]
    fn require_bearer_is_401() {
        let reply = request(None).require_bearer().unwrap_err();
        assert_eq!(reply.status(), StatusCode::UNAUTHORIZED);
    }
}
