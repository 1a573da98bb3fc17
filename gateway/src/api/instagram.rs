use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::instagram::InstagramConnector;
use hyper::Method;

pub struct InstagramApi {
    connector: Option<InstagramConnector>,
}

impl InstagramApi {
    pub fn new(connector: Option<InstagramConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for InstagramApi {
    fn name(&self) -> &'static str {
        "instagram"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(instagram) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(instagram, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(ig: &InstagramConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["profile"]) => respond::vendor(ig.profile().await),
        (&Method::GET, ["media"]) => {
            respond::vendor(ig.media(req.query_param("limit")).await)
        }
        (&Method::GET, ["insights"]) => respond::vendor(
            ig.user_insights(req.query_param("metrics"), req.query_param("period"))
                .await,
        ),
        (&Method::GET, ["media", media_id, "insights"]) => {
            respond::vendor(ig.media_insights(media_id, req.query_param("metrics")).await)
        }
        (&Method::POST, ["media", "photo"]) => {
            let object = req.object()?;
            let image_url = require_str(object, "image_url")?;
            let caption = optional_str(object, "caption").unwrap_or("");
            respond::vendor(ig.publish_photo(image_url, caption).await)
        }
        (&Method::POST, ["media", "video"]) => {
            let object = req.object()?;
            let video_url = require_str(object, "video_url")?;
            let caption = optional_str(object, "caption").unwrap_or("");
            respond::vendor(ig.publish_video(video_url, caption).await)
        }
        (&Method::GET, ["media", media_id, "comments"]) => {
            respond::vendor(ig.comments(media_id, req.query_param("limit")).await)
        }
        (&Method::POST, ["comments", comment_id, "replies"]) => {
            let object = req.object()?;
            let message = require_str(object, "message")?;
            respond::vendor(ig.reply_to_comment(comment_id, message).await)
        }
        (&Method::DELETE, ["comments", comment_id]) => {
            respond::vendor(ig.delete_comment(comment_id).await)
        }
        (&Method::POST, ["comments", comment_id, "hide"]) => {
            let object = req.object()?;
            let hide = object.get("hide").and_then(|v| v.as_bool()).unwrap_or(true);
            respond::vendor(ig.hide_comment(comment_id, hide).await)
        }
        (&Method::GET, ["hashtags", "search"]) => {
            let name = req.require_query("q")?;
            respond::vendor(ig.search_hashtag(name).await)
        }
        (&Method::GET, ["hashtags", hashtag_id, kind @ ("recent_media" | "top_media")]) => {
            respond::vendor(ig.hashtag_media(hashtag_id, kind).await)
        }
        (&Method::GET, ["mentions"]) => {
            respond::vendor(ig.mentioned_media(req.query_param("limit")).await)
        }
        (&Method::GET, ["stories"]) => {
            respond::vendor(ig.stories(req.query_param("limit")).await)
        }
        (&Method::GET, ["stories", story_id, "insights"]) => {
            respond::vendor(ig.story_insights(story_id).await)
        }
        (&Method::GET, ["business-discovery", username]) => {
            respond::vendor(ig.business_discovery(username).await)
        }
        _ => respond::not_found(),
    })
}
