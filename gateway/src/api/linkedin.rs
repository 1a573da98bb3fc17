use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::linkedin::LinkedInConnector;
use hyper::Method;

/// LinkedIn member routes have no service credential: every call requires
/// the inbound caller's own bearer token.
pub struct LinkedInApi {
    connector: LinkedInConnector,
}

impl LinkedInApi {
    pub fn new(connector: LinkedInConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for LinkedInApi {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        handle(&self.connector, req)
            .await
            .unwrap_or_else(|reply| reply)
    }
}

async fn handle(linkedin: &LinkedInConnector, req: ApiRequest) -> RouteResult {
    let token = req.require_bearer()?.to_string();
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["profile"]) => respond::vendor(linkedin.profile(&token).await),
        (&Method::GET, ["email"]) => respond::vendor(linkedin.email(&token).await),
        (&Method::GET, ["urn"]) => respond::vendor(linkedin.urn(&token).await),
        (&Method::GET, ["posts"]) => respond::vendor(linkedin.posts(&token).await),
        (&Method::POST, ["posts"]) => {
            let object = req.object()?;
            let text = require_str(object, "text")?;
            respond::vendor(linkedin.create_post(&token, text).await)
        }
        (&Method::GET, ["posts", post_urn]) => {
            respond::vendor(linkedin.get_post(&token, post_urn).await)
        }
        (&Method::DELETE, ["posts", post_urn]) => {
            respond::vendor(linkedin.delete_post(&token, post_urn).await)
        }
        (&Method::POST, ["posts", post_urn, "like"]) => {
            respond::vendor(linkedin.like_post(&token, post_urn).await)
        }
        (&Method::POST, ["posts", post_urn, "comments"]) => {
            let object = req.object()?;
            let text = require_str(object, "text")?;
            respond::vendor(linkedin.comment_on_post(&token, post_urn, text).await)
        }
        _ => respond::not_found(),
    })
}
