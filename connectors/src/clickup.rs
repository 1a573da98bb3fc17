//! ClickUp API v2 (`https://api.clickup.com/api/v2/`). The API token is sent
//! as the raw `Authorization` header value.

use crate::client::{Auth, CallResult, VendorClient};
use serde_json::{Map, Value, json};
use url::Url;

const CLICKUP_API_BASE: &str = "https://api.clickup.com/api/v2/";

#[derive(Debug, Clone)]
pub struct ClickUpConnector {
    client: VendorClient,
}

impl ClickUpConnector {
    pub fn new(api_token: String) -> Self {
        let base_url = Url::parse(CLICKUP_API_BASE).expect("valid ClickUp base URL");
        Self::with_base_url(api_token, base_url)
    }

    pub fn with_base_url(api_token: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Token(api_token)),
        }
    }

    pub async fn authorized_user(&self) -> CallResult {
        self.client.get("user").send().await
    }

    pub async fn teams(&self) -> CallResult {
        self.client.get("team").send().await
    }

    pub async fn spaces(&self, team_id: &str) -> CallResult {
        self.client.get(format!("team/{team_id}/space")).send().await
    }

    pub async fn folders(&self, space_id: &str) -> CallResult {
        self.client
            .get(format!("space/{space_id}/folder"))
            .send()
            .await
    }

    pub async fn lists(&self, folder_id: &str) -> CallResult {
        self.client
            .get(format!("folder/{folder_id}/list"))
            .send()
            .await
    }

    pub async fn tasks(&self, list_id: &str) -> CallResult {
        self.client.get(format!("list/{list_id}/task")).send().await
    }

    pub async fn get_task(&self, task_id: &str) -> CallResult {
        self.client.get(format!("task/{task_id}")).send().await
    }

    pub async fn create_task(&self, list_id: &str, fields: &Map<String, Value>) -> CallResult {
        self.client
            .post(format!("list/{list_id}/task"))
            .json(Value::Object(fields.clone()))
            .send()
            .await
    }

    pub async fn update_task(&self, task_id: &str, updates: &Value) -> CallResult {
        self.client
            .put(format!("task/{task_id}"))
            .json(updates.clone())
            .send()
            .await
    }

    pub async fn delete_task(&self, task_id: &str) -> CallResult {
        self.client.delete(format!("task/{task_id}")).send().await
    }

    pub async fn task_comments(&self, task_id: &str) -> CallResult {
        self.client
            .get(format!("task/{task_id}/comment"))
            .send()
            .await
    }

    pub async fn create_comment(&self, task_id: &str, comment_text: &str) -> CallResult {
        self.client
            .post(format!("task/{task_id}/comment"))
            .json(json!({"comment_text": comment_text}))
            .send()
            .await
    }

    pub async fn update_comment(&self, comment_id: &str, comment_text: &str) -> CallResult {
        self.client
            .put(format!("comment/{comment_id}"))
            .json(json!({"comment_text": comment_text}))
            .send()
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> CallResult {
        self.client
            .delete(format!("comment/{comment_id}"))
            .send()
            .await
    }

    pub async fn list_custom_fields(&self, list_id: &str) -> CallResult {
        self.client
            .get(format!("list/{list_id}/field"))
            .send()
            .await
    }

    pub async fn set_custom_field(
        &self,
        task_id: &str,
        field_id: &str,
        value: &Value,
    ) -> CallResult {
        self.client
            .post(format!("task/{task_id}/field/{field_id}"))
            .json(json!({"value": value}))
            .send()
            .await
    }

    pub async fn remove_custom_field(&self, task_id: &str, field_id: &str) -> CallResult {
        self.client
            .delete(format!("task/{task_id}/field/{field_id}"))
            .send()
            .await
    }
}
