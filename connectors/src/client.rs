//! Generic outbound client every vendor connector is built on.
//!
//! One call in, one normalized result out. A vendor responding with any HTTP
//! status, 2xx and 5xx alike, is a *data* outcome (`VendorResponse`) so the
//! route layer can always serialize something back to the caller; only
//! transport-level failures (DNS, refused connection, reset) surface as
//! `CallError::Network`. There are no retries and no caching here.

use reqwest::Method;
use serde_json::{Map, Value, json};
use thiserror::Error;
use url::Url;

/// How a vendor authenticates outbound calls.
#[derive(Debug, Clone)]
pub enum Auth {
    /// `Authorization: Bearer <token>` (Slack, Notion, Asana, WhatsApp, ...).
    Bearer(String),
    /// `Authorization: Bot <token>` (Discord bot endpoints).
    Bot(String),
    /// HTTP basic auth (Jira uses email + API token).
    Basic { user: String, secret: String },
    /// Raw `Authorization` header value (ClickUp, Monday).
    Token(String),
    /// `?access_token=<token>` query parameter (Meta Graph APIs).
    QueryToken(String),
    /// No service credential; each call supplies its own bearer
    /// (LinkedIn member routes, Discord `/me`).
    None,
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Normalized vendor outcome: the numeric status plus a JSON body. Empty
/// success bodies become `{"status":"success"}`; unparseable bodies are
/// wrapped as `{"raw": <text>}` rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorResponse {
    pub status: u16,
    pub body: Value,
}

impl VendorResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type CallResult = Result<VendorResponse, CallError>;

/// One instance per vendor: base URL, auth scheme, default headers.
#[derive(Debug, Clone)]
pub struct VendorClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Auth,
    default_headers: Vec<(&'static str, String)>,
}

impl VendorClient {
    pub fn new(base_url: Url, auth: Auth) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            auth,
            default_headers: Vec::new(),
        }
    }

    /// Attach a header sent on every call (e.g. `Notion-Version`).
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.default_headers.push((name, value.into()));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request(&self, method: Method, path: impl Into<String>) -> VendorRequest<'_> {
        VendorRequest {
            client: self,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            form: None,
            multipart: None,
            bearer: None,
        }
    }

    pub fn get(&self, path: impl Into<String>) -> VendorRequest<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: impl Into<String>) -> VendorRequest<'_> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: impl Into<String>) -> VendorRequest<'_> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: impl Into<String>) -> VendorRequest<'_> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: impl Into<String>) -> VendorRequest<'_> {
        self.request(Method::DELETE, path)
    }
}

/// Builder for a single outbound call.
pub struct VendorRequest<'a> {
    client: &'a VendorClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    form: Option<Vec<(String, String)>>,
    multipart: Option<reqwest::multipart::Form>,
    bearer: Option<String>,
}

impl VendorRequest<'_> {
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Pass caller-supplied filters through as query parameters, stringifying
    /// scalar JSON values the way they arrived.
    pub fn query_map(mut self, map: &Map<String, Value>) -> Self {
        for (key, value) in map {
            self.query.push((key.clone(), value_to_string(value)));
        }
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    /// Multipart body for file uploads; the boundary header comes from
    /// reqwest.
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.multipart = Some(form);
        self
    }

    /// Per-call bearer token, overriding the client's auth scheme. Used where
    /// the inbound caller's own token is forwarded to the vendor.
    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    /// Assemble the reqwest request without sending it. Split out so tests
    /// can assert on URL, headers and payload shaping.
    pub fn build(self) -> Result<reqwest::Request, CallError> {
        let mut url = self
            .client
            .base_url
            .join(&self.path)
            .map_err(|e| CallError::Url(format!("{}: {e}", self.path)))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        if self.bearer.is_none()
            && let Auth::QueryToken(token) = &self.client.auth
        {
            url.query_pairs_mut().append_pair("access_token", token);
        }

        let mut builder = self.client.http.request(self.method, url);

        builder = match (&self.bearer, &self.client.auth) {
            (Some(token), _) => builder.bearer_auth(token),
            (None, Auth::Bearer(token)) => builder.bearer_auth(token),
            (None, Auth::Bot(token)) => builder.header("Authorization", format!("Bot {token}")),
            (None, Auth::Basic { user, secret }) => builder.basic_auth(user, Some(secret)),
            (None, Auth::Token(token)) => builder.header("Authorization", token.clone()),
            (None, Auth::QueryToken(_)) | (None, Auth::None) => builder,
        };

        for (name, value) in &self.client.default_headers {
            builder = builder.header(*name, value.clone());
        }

        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        if let Some(fields) = &self.form {
            builder = builder.form(fields);
        }
        if let Some(form) = self.multipart {
            builder = builder.multipart(form);
        }

        builder
            .build()
            .map_err(|e| CallError::Network(e.to_string()))
    }

    /// Perform the call and normalize the response.
    pub async fn send(self) -> CallResult {
        let client = self.client.http.clone();
        let request = self.build()?;

        tracing::debug!(method = %request.method(), url = %request.url(), "outbound call");

        let response = client
            .execute(request)
            .await
            .map_err(|e| CallError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CallError::Network(e.to_string()))?;

        let body = normalize_body(status, &text);
        if status >= 500 {
            tracing::warn!(status, "vendor server error");
        }
        Ok(VendorResponse { status, body })
    }
}

fn normalize_body(status: u16, text: &str) -> Value {
    if text.trim().is_empty() {
        return if (200..300).contains(&status) {
            json!({"status": "success"})
        } else {
            json!({"raw": ""})
        };
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({"raw": text}))
}

/// Stringify a scalar JSON value for use as a query parameter.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Copy the named optional fields from the caller's bag into a payload that
/// already holds the required fields. Everything else in the bag is ignored;
/// the adapter never invents fields the vendor did not ask for.
pub fn merge_extra(payload: &mut Value, extra: &Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if let Some(value) = extra.get(*key) {
            payload[*key] = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(auth: Auth) -> VendorClient {
        VendorClient::new(Url::parse("https://api.example.com/v1/").unwrap(), auth)
    }

    #[test]
    fn build_joins_path_and_query() {
        let c = client(Auth::Bearer("tok".into()));
        let req = c
            .get("things/42")
            .query("limit", "10")
            .query_opt("cursor", None)
            .build()
            .unwrap();
        assert_eq!(req.url().path(), "/v1/things/42");
        assert_eq!(req.url().query(), Some("limit=10"));
        assert_eq!(
            req.headers().get("Authorization").unwrap(),
            "Bearer tok"
        );
    }

    #[test]
    fn query_token_auth_lands_in_url_not_headers() {
        let c = client(Auth::QueryToken("sekrit".into()));
        let req = c.get("me").query("fields", "id,name").build().unwrap();
        assert!(req.url().query().unwrap().contains("access_token=sekrit"));
        assert!(req.headers().get("Authorization").is_none());
    }

    #[test]
    fn per_call_bearer_overrides_client_auth() {
        let c = client(Auth::Bot("bot-tok".into()));
        let req = c.get("users/@me").bearer("user-tok").build().unwrap();
        assert_eq!(
            req.headers().get("Authorization").unwrap(),
            "Bearer user-tok"
        );
    }

    #[test]
    fn bot_and_raw_token_schemes() {
        let c = client(Auth::Bot("b".into()));
        let req = c.get("x").build().unwrap();
        assert_eq!(req.headers().get("Authorization").unwrap(), "Bot b");

        let c = client(Auth::Token("raw".into()));
        let req = c.get("x").build().unwrap();
        assert_eq!(req.headers().get("Authorization").unwrap(), "raw");
    }

    #[test]
    fn default_headers_are_attached() {
        let c = client(Auth::Bearer("t".into())).with_header("Notion-Version", "2022-06-28");
        let req = c.get("search").build().unwrap();
        assert_eq!(req.headers().get("Notion-Version").unwrap(), "2022-06-28");
    }

    #[test]
    fn normalize_body_handles_empty_and_non_json() {
        assert_eq!(normalize_body(204, ""), json!({"status": "success"}));
        assert_eq!(normalize_body(502, "<html>bad gateway</html>"), json!({"raw": "<html>bad gateway</html>"}));
        assert_eq!(normalize_body(200, r#"{"ok":true}"#), json!({"ok": true}));
        assert_eq!(normalize_body(404, ""), json!({"raw": ""}));
    }

    #[test]
    fn merge_extra_copies_only_named_keys() {
        let mut payload = json!({"channel": "C1", "text": "hi"});
        let extra: Map<String, Value> = serde_json::from_value(json!({
            "blocks": [{"type": "section"}],
            "unrelated": true
        }))
        .unwrap();
        merge_extra(&mut payload, &extra, &["blocks", "attachments"]);
        assert_eq!(payload["blocks"][0]["type"], "section");
        assert!(payload.get("attachments").is_none());
        assert!(payload.get("unrelated").is_none());
    }
}
