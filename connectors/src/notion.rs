//! Notion REST API (`https://api.notion.com/v1/`). Bearer auth plus the
//! mandatory `Notion-Version` header on every call.

use crate::client::{Auth, CallResult, VendorClient, merge_extra};
use serde_json::{Map, Value, json};
use url::Url;

const NOTION_API_BASE: &str = "https://api.notion.com/v1/";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone)]
pub struct NotionConnector {
    client: VendorClient,
}

impl NotionConnector {
    pub fn new(token: String, version: String) -> Self {
        let base_url = Url::parse(NOTION_API_BASE).expect("valid Notion base URL");
        Self::with_base_url(token, version, base_url)
    }

    pub fn with_base_url(token: String, version: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Bearer(token))
                .with_header("Notion-Version", version),
        }
    }

    pub async fn search(&self, query: &str, object_type: Option<&str>) -> CallResult {
        let mut payload = json!({"query": query});
        if let Some(object_type) = object_type {
            payload["filter"] = json!({"value": object_type, "property": "object"});
        }
        self.client.post("search").json(payload).send().await
    }

    /// Search scoped to databases; Notion has no dedicated list endpoint.
    pub async fn list_databases(&self) -> CallResult {
        self.search("", Some("database")).await
    }

    pub async fn get_database(&self, database_id: &str) -> CallResult {
        self.client
            .get(format!("databases/{database_id}"))
            .send()
            .await
    }

    pub async fn query_database(&self, database_id: &str, filter: Option<&Value>) -> CallResult {
        let mut request = self.client.post(format!("databases/{database_id}/query"));
        if let Some(filter) = filter {
            request = request.json(filter.clone());
        }
        request.send().await
    }

    /// Create a page in a database with a single title property.
    pub async fn create_page(
        &self,
        database_id: &str,
        title_property: &str,
        title: &str,
        extra: &Map<String, Value>,
    ) -> CallResult {
        let mut payload = json!({
            "parent": {"database_id": database_id},
            "properties": {
                title_property: {
                    "title": [{"text": {"content": title}}]
                }
            }
        });
        merge_extra(&mut payload, extra, &["icon", "cover", "children"]);
        self.client.post("pages").json(payload).send().await
    }

    pub async fn get_page(&self, page_id: &str) -> CallResult {
        self.client.get(format!("pages/{page_id}")).send().await
    }

    pub async fn update_page(&self, page_id: &str, properties: &Value) -> CallResult {
        let payload = json!({"properties": properties});
        self.client
            .patch(format!("pages/{page_id}"))
            .json(payload)
            .send()
            .await
    }

    pub async fn append_blocks(&self, block_id: &str, children: &Value) -> CallResult {
        let payload = json!({"children": children});
        self.client
            .patch(format!("blocks/{block_id}/children"))
            .json(payload)
            .send()
            .await
    }

    pub async fn get_block_children(&self, block_id: &str) -> CallResult {
        self.client
            .get(format!("blocks/{block_id}/children"))
            .send()
            .await
    }

    pub async fn get_block(&self, block_id: &str) -> CallResult {
        self.client.get(format!("blocks/{block_id}")).send().await
    }

    pub async fn list_users(&self) -> CallResult {
        self.client.get("users").send().await
    }

    pub async fn get_user(&self, user_id: &str) -> CallResult {
        self.client.get(format!("users/{user_id}")).send().await
    }

    /// Comment on a page (parent) or reply within an existing discussion.
    pub async fn create_comment(
        &self,
        page_id: Option<&str>,
        discussion_id: Option<&str>,
        text: &str,
    ) -> CallResult {
        let mut payload = json!({
            "rich_text": [{"text": {"content": text}}]
        });
        if let Some(page_id) = page_id {
            payload["parent"] = json!({"page_id": page_id});
        } else if let Some(discussion_id) = discussion_id {
            payload["discussion_id"] = json!(discussion_id);
        }
        self.client.post("comments").json(payload).send().await
    }

    pub async fn get_comments(&self, block_id: &str) -> CallResult {
        self.client
            .get("comments")
            .query("block_id", block_id)
            .send()
            .await
    }
}
