//! Facebook Graph API (`https://graph.facebook.com/v18.0/`). Auth is the
//! access token as an `access_token` query parameter.

use crate::client::{Auth, CallResult, VendorClient};
use url::Url;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0/";

#[derive(Debug, Clone)]
pub struct FacebookConnector {
    client: VendorClient,
}

impl FacebookConnector {
    pub fn new(access_token: String) -> Self {
        let base_url = Url::parse(GRAPH_API_BASE).expect("valid Graph API base URL");
        Self::with_base_url(access_token, base_url)
    }

    pub fn with_base_url(access_token: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::QueryToken(access_token)),
        }
    }

    pub async fn me(&self) -> CallResult {
        self.client
            .get("me")
            .query("fields", "id,name,email,picture")
            .send()
            .await
    }

    pub async fn user_picture(&self, user_id: &str) -> CallResult {
        self.client
            .get(format!("{user_id}/picture"))
            .query("redirect", "false")
            .query("type", "large")
            .send()
            .await
    }

    pub async fn user_feed(&self, user_id: &str) -> CallResult {
        self.client
            .get(format!("{user_id}/feed"))
            .query("fields", "id,message,created_time")
            .send()
            .await
    }

    pub async fn user_posts(&self, user_id: &str) -> CallResult {
        self.client
            .get(format!("{user_id}/posts"))
            .query("fields", "id,message,created_time,permalink_url")
            .send()
            .await
    }

    pub async fn create_post(&self, user_id: &str, message: &str) -> CallResult {
        self.client
            .post(format!("{user_id}/feed"))
            .form(vec![("message".into(), message.to_string())])
            .send()
            .await
    }

    pub async fn get_post(&self, post_id: &str) -> CallResult {
        self.client
            .get(post_id.to_string())
            .query("fields", "id,message,created_time,from,permalink_url")
            .send()
            .await
    }

    pub async fn delete_post(&self, post_id: &str) -> CallResult {
        self.client.delete(post_id.to_string()).send().await
    }

    pub async fn post_comments(&self, post_id: &str) -> CallResult {
        self.client
            .get(format!("{post_id}/comments"))
            .query("fields", "id,message,from,created_time")
            .send()
            .await
    }

    pub async fn add_comment(&self, post_id: &str, message: &str) -> CallResult {
        self.client
            .post(format!("{post_id}/comments"))
            .form(vec![("message".into(), message.to_string())])
            .send()
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> CallResult {
        self.client.delete(comment_id.to_string()).send().await
    }

    pub async fn post_reactions(&self, post_id: &str) -> CallResult {
        self.client
            .get(format!("{post_id}/reactions"))
            .query("summary", "true")
            .send()
            .await
    }

    pub async fn add_reaction(&self, post_id: &str, reaction_type: &str) -> CallResult {
        self.client
            .post(format!("{post_id}/reactions"))
            .form(vec![("type".into(), reaction_type.to_uppercase())])
            .send()
            .await
    }

    pub async fn remove_reaction(&self, post_id: &str) -> CallResult {
        self.client
            .delete(format!("{post_id}/reactions"))
            .send()
            .await
    }

    pub async fn user_photos(&self, user_id: &str) -> CallResult {
        self.client
            .get(format!("{user_id}/photos"))
            .query("fields", "id,name,picture,created_time")
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rides_in_query_on_deletes_too() {
        let fb = FacebookConnector::new("tok".into());
        let req = fb.client.delete("12345_67890").build().unwrap();
        assert_eq!(req.url().path(), "/v18.0/12345_67890");
        assert_eq!(req.url().query(), Some("access_token=tok"));
    }
}
