//! Instagram Graph API (`https://graph.facebook.com/v19.0/`). Auth is the
//! access token as an `access_token` query parameter, and most paths hang off
//! the configured business account id. Publishing is a two-step container
//! flow: create the media container, then publish it.

use crate::client::{Auth, CallResult, VendorClient, VendorResponse};
use serde_json::json;
use url::Url;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0/";

const PROFILE_FIELDS: &str =
    "id,username,account_type,media_count,followers_count,follows_count,name,profile_picture_url";
const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,thumbnail_url,timestamp,username";

#[derive(Debug, Clone)]
pub struct InstagramConnector {
    client: VendorClient,
    user_id: String,
}

impl InstagramConnector {
    pub fn new(access_token: String, user_id: String) -> Self {
        let base_url = Url::parse(GRAPH_API_BASE).expect("valid Graph API base URL");
        Self::with_base_url(access_token, user_id, base_url)
    }

    pub fn with_base_url(access_token: String, user_id: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::QueryToken(access_token)),
            user_id,
        }
    }

    pub async fn profile(&self) -> CallResult {
        self.client
            .get(self.user_id.clone())
            .query("fields", PROFILE_FIELDS)
            .send()
            .await
    }

    pub async fn media(&self, limit: Option<&str>) -> CallResult {
        self.client
            .get(format!("{}/media", self.user_id))
            .query("fields", MEDIA_FIELDS)
            .query_opt("limit", limit)
            .send()
            .await
    }

    pub async fn user_insights(&self, metrics: Option<&str>, period: Option<&str>) -> CallResult {
        self.client
            .get(format!("{}/insights", self.user_id))
            .query(
                "metric",
                metrics.unwrap_or("impressions,reach,profile_views,follower_count"),
            )
            .query("period", period.unwrap_or("day"))
            .send()
            .await
    }

    pub async fn media_insights(&self, media_id: &str, metrics: Option<&str>) -> CallResult {
        self.client
            .get(format!("{media_id}/insights"))
            .query(
                "metric",
                metrics.unwrap_or("impressions,reach,engagement,saved"),
            )
            .send()
            .await
    }

    async fn publish_container(&self, container: VendorResponse) -> CallResult {
        if !container.is_success() {
            return Ok(container);
        }
        let creation_id = match container.body["id"].as_str() {
            Some(id) => id.to_string(),
            None => {
                return Ok(VendorResponse {
                    status: 502,
                    body: json!({
                        "error": "media container response missing id",
                        "details": container.body,
                    }),
                });
            }
        };
        self.client
            .post(format!("{}/media_publish", self.user_id))
            .form(vec![("creation_id".into(), creation_id)])
            .send()
            .await
    }

    pub async fn publish_photo(&self, image_url: &str, caption: &str) -> CallResult {
        let container = self
            .client
            .post(format!("{}/media", self.user_id))
            .form(vec![
                ("image_url".into(), image_url.to_string()),
                ("caption".into(), caption.to_string()),
            ])
            .send()
            .await?;
        self.publish_container(container).await
    }

    pub async fn publish_video(&self, video_url: &str, caption: &str) -> CallResult {
        let container = self
            .client
            .post(format!("{}/media", self.user_id))
            .form(vec![
                ("media_type".into(), "VIDEO".into()),
                ("video_url".into(), video_url.to_string()),
                ("caption".into(), caption.to_string()),
            ])
            .send()
            .await?;
        self.publish_container(container).await
    }

    pub async fn comments(&self, media_id: &str, limit: Option<&str>) -> CallResult {
        self.client
            .get(format!("{media_id}/comments"))
            .query("fields", "id,text,username,timestamp")
            .query_opt("limit", limit)
            .send()
            .await
    }

    pub async fn reply_to_comment(&self, comment_id: &str, message: &str) -> CallResult {
        self.client
            .post(format!("{comment_id}/replies"))
            .form(vec![("message".into(), message.to_string())])
            .send()
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> CallResult {
        self.client.delete(comment_id.to_string()).send().await
    }

    pub async fn hide_comment(&self, comment_id: &str, hide: bool) -> CallResult {
        self.client
            .post(comment_id.to_string())
            .form(vec![("hide".into(), hide.to_string())])
            .send()
            .await
    }

    pub async fn search_hashtag(&self, name: &str) -> CallResult {
        self.client
            .get("ig_hashtag_search")
            .query("user_id", self.user_id.clone())
            .query("q", name)
            .send()
            .await
    }

    /// `kind` is `recent_media` or `top_media`.
    pub async fn hashtag_media(&self, hashtag_id: &str, kind: &str) -> CallResult {
        self.client
            .get(format!("{hashtag_id}/{kind}"))
            .query("user_id", self.user_id.clone())
            .query("fields", "id,caption,media_type,permalink")
            .send()
            .await
    }

    pub async fn mentioned_media(&self, limit: Option<&str>) -> CallResult {
        self.client
            .get(format!("{}/tags", self.user_id))
            .query("fields", MEDIA_FIELDS)
            .query_opt("limit", limit)
            .send()
            .await
    }

    pub async fn stories(&self, limit: Option<&str>) -> CallResult {
        self.client
            .get(format!("{}/stories", self.user_id))
            .query("fields", "id,media_type,media_url,timestamp")
            .query_opt("limit", limit)
            .send()
            .await
    }

    pub async fn story_insights(&self, story_id: &str) -> CallResult {
        self.client
            .get(format!("{story_id}/insights"))
            .query("metric", "impressions,reach,replies")
            .send()
            .await
    }

    pub async fn business_discovery(&self, target_username: &str) -> CallResult {
        self.client
            .get(self.user_id.clone())
            .query(
                "fields",
                format!(
                    "business_discovery.username({target_username}){{followers_count,media_count,username}}"
                ),
            )
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_request_carries_token_and_fields() {
        let ig = InstagramConnector::new("tok".into(), "1789".into());
        let req = ig
            .client
            .get(ig.user_id.clone())
            .query("fields", PROFILE_FIELDS)
            .build()
            .unwrap();
        assert_eq!(req.url().path(), "/v19.0/1789");
        let query = req.url().query().unwrap();
        assert!(query.contains("access_token=tok"));
        assert!(query.contains("followers_count"));
    }
}
