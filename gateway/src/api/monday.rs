use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::monday::MondayConnector;
use hyper::Method;

pub struct MondayApi {
    connector: Option<MondayConnector>,
}

impl MondayApi {
    pub fn new(connector: Option<MondayConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for MondayApi {
    fn name(&self) -> &'static str {
        "monday"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(monday) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(monday, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(monday: &MondayConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["boards"]) => {
            let limit = req
                .query_param("limit")
                .and_then(|v| v.parse::<i64>().ok());
            respond::vendor(monday.get_boards(None, limit).await)
        }
        (&Method::POST, ["boards"]) => {
            let object = req.object()?;
            let name = require_str(object, "board_name")?;
            let kind = optional_str(object, "board_kind").unwrap_or("public");
            respond::vendor(
                monday
                    .create_board(name, kind, optional_str(object, "workspace_id"))
                    .await,
            )
        }
        (&Method::POST, ["boards", board_id, "duplicate"]) => {
            let object = req.object()?;
            let duplicate_type =
                optional_str(object, "duplicate_type").unwrap_or("duplicate_board_with_structure");
            respond::vendor(
                monday
                    .duplicate_board(board_id, duplicate_type, optional_str(object, "board_name"))
                    .await,
            )
        }
        (&Method::DELETE, ["boards", board_id]) => {
            respond::vendor(monday.delete_board(board_id).await)
        }
        (&Method::GET, ["boards", board_id, "groups"]) => {
            respond::vendor(monday.board_groups(board_id).await)
        }
        (&Method::POST, ["boards", board_id, "groups"]) => {
            let object = req.object()?;
            let name = require_str(object, "group_name")?;
            respond::vendor(monday.create_group(board_id, name).await)
        }
        (&Method::DELETE, ["boards", board_id, "groups", group_id]) => {
            respond::vendor(monday.delete_group(board_id, group_id).await)
        }
        (&Method::GET, ["workspaces"]) => respond::vendor(monday.get_workspaces().await),
        (&Method::GET, ["items", item_id]) => {
            respond::vendor(monday.get_items(&serde_json::json!([item_id])).await)
        }
        (&Method::POST, ["items"]) => {
            let object = req.object()?;
            let board_id = require_str(object, "board_id")?;
            let item_name = require_str(object, "item_name")?;
            respond::vendor(
                monday
                    .create_item(
                        board_id,
                        item_name,
                        optional_str(object, "group_id"),
                        object.get("column_values"),
                    )
                    .await,
            )
        }
        (&Method::DELETE, ["items", item_id]) => respond::vendor(monday.delete_item(item_id).await),
        (&Method::GET, ["items", item_id, "columns"]) => {
            respond::vendor(monday.item_column_values(item_id).await)
        }
        (&Method::PUT, ["items", item_id, "columns", column_id]) => {
            let object = req.object()?;
            let board_id = require_str(object, "board_id")?;
            let value = object.get("value").ok_or_else(|| {
                respond::bad_request("missing required field: value")
            })?;
            respond::vendor(
                monday
                    .change_column_value(board_id, item_id, column_id, value)
                    .await,
            )
        }
        (&Method::POST, ["items", item_id, "updates"]) => {
            let object = req.object()?;
            let body = require_str(object, "body")?;
            respond::vendor(monday.create_update(item_id, body).await)
        }
        (&Method::GET, ["users"]) => respond::vendor(monday.get_users().await),
        (&Method::GET, ["me"]) => respond::vendor(monday.me().await),
        _ => respond::not_found(),
    })
}
