//! Vendor dispatch. Paths look like `/api/{vendor}/...`; the first segment
//! selects a [`VendorApi`] implementation and the rest is handed to it.

use crate::request::ApiRequest;
use crate::respond::{self, Reply};
use async_trait::async_trait;
use hyper::Method;
use indexmap::IndexMap;
use shared::{counter, histogram};
use std::time::Instant;

/// One implementation per vendor. `dispatch` owns method and path matching
/// below the vendor prefix and never panics on malformed input.
#[async_trait]
pub trait VendorApi: Send + Sync {
    fn name(&self) -> &'static str;

    async fn dispatch(&self, req: ApiRequest) -> Reply;
}

pub struct Router {
    vendors: IndexMap<&'static str, Box<dyn VendorApi>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            vendors: IndexMap::new(),
        }
    }

    pub fn register(&mut self, api: Box<dyn VendorApi>) {
        self.vendors.insert(api.name(), api);
    }

    pub async fn route(
        &self,
        method: Method,
        path: &str,
        query: &str,
        bearer: Option<String>,
        body: &[u8],
    ) -> Reply {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if segments.next() != Some("api") {
            return respond::not_found();
        }
        let Some(vendor) = segments.next() else {
            return respond::not_found();
        };
        let Some(api) = self.vendors.get(vendor) else {
            tracing::warn!(vendor, "unknown vendor");
            counter!(crate::metrics_defs::API_UNKNOWN_VENDOR).increment(1);
            return respond::not_found();
        };

        let body = match parse_body(body) {
            Ok(body) => body,
            Err(reply) => return reply,
        };

        let request = ApiRequest {
            method,
            segments: segments.map(str::to_string).collect(),
            query: parse_query(query),
            body,
            bearer,
        };

        let started = Instant::now();
        counter!(crate::metrics_defs::API_REQUESTS, "vendor" => api.name()).increment(1);
        let reply = api.dispatch(request).await;
        histogram!(crate::metrics_defs::API_REQUEST_DURATION)
            .record(started.elapsed().as_secs_f64());
        reply
    }
}

fn parse_body(body: &[u8]) -> Result<Option<serde_json::Value>, Reply> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|_| respond::bad_request("request body is not valid JSON"))
}

fn parse_query(query: &str) -> IndexMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;
    use serde_json::json;

    struct EchoApi;

    #[async_trait]
    impl VendorApi for EchoApi {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn dispatch(&self, req: ApiRequest) -> Reply {
            respond::json(
                StatusCode::OK,
                &json!({
                    "segments": req.segments,
                    "limit": req.query_param("limit"),
                }),
            )
        }
    }

    fn router() -> Router {
        let mut router = Router::new();
        router.register(Box::new(EchoApi));
        router
    }

    #[tokio::test]
    async fn routes_by_first_segment() {
        let reply = router()
            .route(Method::GET, "/api/echo/a/b", "limit=5", None, b"")
            .await;
        assert_eq!(reply.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_vendor_is_404() {
        let reply = router()
            .route(Method::GET, "/api/nope/a", "", None, b"")
            .await;
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_api_prefix_is_404() {
        let reply = router().route(Method::GET, "/health", "", None, b"").await;
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_body_is_400() {
        let reply = router()
            .route(Method::POST, "/api/echo/x", "", None, b"{not json")
            .await;
        assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
    }
}
