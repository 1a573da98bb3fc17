use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::facebook::FacebookConnector;
use hyper::Method;

pub struct FacebookApi {
    connector: Option<FacebookConnector>,
}

impl FacebookApi {
    pub fn new(connector: Option<FacebookConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for FacebookApi {
    fn name(&self) -> &'static str {
        "facebook"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(facebook) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(facebook, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(fb: &FacebookConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["me"]) => respond::vendor(fb.me().await),
        (&Method::GET, ["users", user_id, "picture"]) => {
            respond::vendor(fb.user_picture(user_id).await)
        }
        (&Method::GET, ["users", user_id, "feed"]) => respond::vendor(fb.user_feed(user_id).await),
        (&Method::GET, ["users", user_id, "posts"]) => {
            respond::vendor(fb.user_posts(user_id).await)
        }
        (&Method::GET, ["users", user_id, "photos"]) => {
            respond::vendor(fb.user_photos(user_id).await)
        }
        (&Method::POST, ["users", user_id, "posts"]) => {
            let object = req.object()?;
            let message = require_str(object, "message")?;
            respond::vendor(fb.create_post(user_id, message).await)
        }
        (&Method::GET, ["posts", post_id]) => respond::vendor(fb.get_post(post_id).await),
        (&Method::DELETE, ["posts", post_id]) => respond::vendor(fb.delete_post(post_id).await),
        (&Method::GET, ["posts", post_id, "comments"]) => {
            respond::vendor(fb.post_comments(post_id).await)
        }
        (&Method::POST, ["posts", post_id, "comments"]) => {
            let object = req.object()?;
            let message = require_str(object, "message")?;
            respond::vendor(fb.add_comment(post_id, message).await)
        }
        (&Method::DELETE, ["comments", comment_id]) => {
            respond::vendor(fb.delete_comment(comment_id).await)
        }
        (&Method::GET, ["posts", post_id, "reactions"]) => {
            respond::vendor(fb.post_reactions(post_id).await)
        }
        (&Method::POST, ["posts", post_id, "reactions"]) => {
            let object = req.object()?;
            let reaction_type = require_str(object, "type")?;
            respond::vendor(fb.add_reaction(post_id, reaction_type).await)
        }
        (&Method::DELETE, ["posts", post_id, "reactions"]) => {
            respond::vendor(fb.remove_reaction(post_id).await)
        }
        _ => respond::not_found(),
    })
}
