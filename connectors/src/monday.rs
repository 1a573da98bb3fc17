//! Monday.com GraphQL API (`https://api.monday.com/v2`). Every operation is
//! a POST of `{query, variables}` to the single endpoint; the API key is the
//! raw `Authorization` header value.

use crate::client::{Auth, CallResult, VendorClient};
use serde_json::{Value, json};
use url::Url;

const MONDAY_API_URL: &str = "https://api.monday.com/v2";

#[derive(Debug, Clone)]
pub struct MondayConnector {
    client: VendorClient,
}

impl MondayConnector {
    pub fn new(api_key: String) -> Self {
        let base_url = Url::parse(MONDAY_API_URL).expect("valid Monday endpoint URL");
        Self::with_base_url(api_key, base_url)
    }

    pub fn with_base_url(api_key: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Token(api_key)),
        }
    }

    async fn gql(&self, query: &str, variables: Value) -> CallResult {
        self.client
            .post("")
            .json(json!({"query": query, "variables": variables}))
            .send()
            .await
    }

    pub async fn get_boards(&self, ids: Option<&Value>, limit: Option<i64>) -> CallResult {
        let query = "query ($ids: [ID!], $limit: Int) { boards (ids: $ids, limit: $limit) { id name state board_kind workspace_id } }";
        self.gql(query, json!({"ids": ids, "limit": limit})).await
    }

    pub async fn create_board(
        &self,
        board_name: &str,
        board_kind: &str,
        workspace_id: Option<&str>,
    ) -> CallResult {
        let query = "mutation ($name: String!, $kind: BoardKind!, $workspaceId: ID) { create_board (board_name: $name, board_kind: $kind, workspace_id: $workspaceId) { id name } }";
        self.gql(
            query,
            json!({"name": board_name, "kind": board_kind, "workspaceId": workspace_id}),
        )
        .await
    }

    pub async fn duplicate_board(
        &self,
        board_id: &str,
        duplicate_type: &str,
        board_name: Option<&str>,
    ) -> CallResult {
        let query = "mutation ($boardId: ID!, $type: DuplicateBoardType!, $name: String) { duplicate_board (board_id: $boardId, duplicate_type: $type, board_name: $name) { board { id name } } }";
        self.gql(
            query,
            json!({"boardId": board_id, "type": duplicate_type, "name": board_name}),
        )
        .await
    }

    pub async fn delete_board(&self, board_id: &str) -> CallResult {
        let query = "mutation ($boardId: ID!) { delete_board (board_id: $boardId) { id } }";
        self.gql(query, json!({"boardId": board_id})).await
    }

    pub async fn get_workspaces(&self) -> CallResult {
        let query = "query { workspaces { id name kind description } }";
        self.gql(query, json!({})).await
    }

    pub async fn get_items(&self, ids: &Value) -> CallResult {
        let query = "query ($ids: [ID!]) { items (ids: $ids) { id name state board { id } group { id } } }";
        self.gql(query, json!({"ids": ids})).await
    }

    pub async fn create_item(
        &self,
        board_id: &str,
        item_name: &str,
        group_id: Option<&str>,
        column_values: Option<&Value>,
    ) -> CallResult {
        let query = "mutation ($boardId: ID!, $name: String!, $groupId: String, $columnValues: JSON) { create_item (board_id: $boardId, item_name: $name, group_id: $groupId, column_values: $columnValues) { id name } }";
        let column_values = column_values.map(|v| v.to_string());
        self.gql(
            query,
            json!({
                "boardId": board_id,
                "name": item_name,
                "groupId": group_id,
                "columnValues": column_values,
            }),
        )
        .await
    }

    pub async fn change_column_value(
        &self,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &Value,
    ) -> CallResult {
        let query = "mutation ($boardId: ID!, $itemId: ID!, $columnId: String!, $value: JSON!) { change_column_value (board_id: $boardId, item_id: $itemId, column_id: $columnId, value: $value) { id } }";
        self.gql(
            query,
            json!({
                "boardId": board_id,
                "itemId": item_id,
                "columnId": column_id,
                "value": value.to_string(),
            }),
        )
        .await
    }

    pub async fn delete_item(&self, item_id: &str) -> CallResult {
        let query = "mutation ($itemId: ID!) { delete_item (item_id: $itemId) { id } }";
        self.gql(query, json!({"itemId": item_id})).await
    }

    pub async fn item_column_values(&self, item_id: &str) -> CallResult {
        let query = "query ($ids: [ID!]) { items (ids: $ids) { id name column_values { id text value type } } }";
        self.gql(query, json!({"ids": [item_id]})).await
    }

    pub async fn board_groups(&self, board_id: &str) -> CallResult {
        let query = "query ($ids: [ID!]) { boards (ids: $ids) { groups { id title color position } } }";
        self.gql(query, json!({"ids": [board_id]})).await
    }

    pub async fn create_group(&self, board_id: &str, group_name: &str) -> CallResult {
        let query = "mutation ($boardId: ID!, $name: String!) { create_group (board_id: $boardId, group_name: $name) { id title } }";
        self.gql(query, json!({"boardId": board_id, "name": group_name}))
            .await
    }

    pub async fn delete_group(&self, board_id: &str, group_id: &str) -> CallResult {
        let query = "mutation ($boardId: ID!, $groupId: String!) { delete_group (board_id: $boardId, group_id: $groupId) { id deleted } }";
        self.gql(query, json!({"boardId": board_id, "groupId": group_id}))
            .await
    }

    pub async fn get_users(&self) -> CallResult {
        let query = "query { users { id name email enabled is_admin } }";
        self.gql(query, json!({})).await
    }

    pub async fn me(&self) -> CallResult {
        let query = "query { me { id name email } }";
        self.gql(query, json!({})).await
    }

    /// Monday calls item comments "updates".
    pub async fn create_update(&self, item_id: &str, body: &str) -> CallResult {
        let query = "mutation ($itemId: ID!, $body: String!) { create_update (item_id: $itemId, body: $body) { id body } }";
        self.gql(query, json!({"itemId": item_id, "body": body}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gql_posts_query_and_variables() {
        // Build-only check: the request body must carry both keys even when
        // variables are empty.
        let monday = MondayConnector::new("key".into());
        let request = monday
            .client
            .post("")
            .json(json!({"query": "query { me { id } }", "variables": {}}))
            .build()
            .unwrap();
        let body = request.body().unwrap().as_bytes().unwrap();
        let value: Value = serde_json::from_slice(body).unwrap();
        assert!(value["query"].as_str().unwrap().contains("me"));
        assert!(value["variables"].is_object());
    }
}
