use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::notion::NotionConnector;
use hyper::Method;

pub struct NotionApi {
    connector: Option<NotionConnector>,
}

impl NotionApi {
    pub fn new(connector: Option<NotionConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for NotionApi {
    fn name(&self) -> &'static str {
        "notion"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(notion) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(notion, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(notion: &NotionConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::POST, ["search"]) => {
            let object = req.object()?;
            let query = require_str(object, "query")?;
            respond::vendor(notion.search(query, optional_str(object, "object_type")).await)
        }
        (&Method::GET, ["databases"]) => respond::vendor(notion.list_databases().await),
        (&Method::GET, ["databases", id]) => respond::vendor(notion.get_database(id).await),
        (&Method::POST, ["databases", id, "query"]) => {
            let filter = req.body.as_ref().and_then(|b| b.get("filter"));
            respond::vendor(notion.query_database(id, filter).await)
        }
        (&Method::POST, ["pages"]) => {
            let object = req.object()?;
            let database_id = require_str(object, "database_id")?;
            let title = require_str(object, "title")?;
            let title_property = optional_str(object, "title_property").unwrap_or("Name");
            respond::vendor(
                notion
                    .create_page(database_id, title_property, title, object)
                    .await,
            )
        }
        (&Method::GET, ["pages", id]) => respond::vendor(notion.get_page(id).await),
        (&Method::PATCH, ["pages", id]) => {
            let object = req.object()?;
            let properties = object.get("properties").ok_or_else(|| {
                respond::bad_request("missing required field: properties")
            })?;
            respond::vendor(notion.update_page(id, properties).await)
        }
        (&Method::PATCH, ["blocks", id, "children"]) => {
            let object = req.object()?;
            let children = object.get("children").ok_or_else(|| {
                respond::bad_request("missing required field: children")
            })?;
            respond::vendor(notion.append_blocks(id, children).await)
        }
        (&Method::GET, ["blocks", id, "children"]) => {
            respond::vendor(notion.get_block_children(id).await)
        }
        (&Method::GET, ["blocks", id]) => respond::vendor(notion.get_block(id).await),
        (&Method::GET, ["users"]) => respond::vendor(notion.list_users().await),
        (&Method::GET, ["users", id]) => respond::vendor(notion.get_user(id).await),
        (&Method::POST, ["comments"]) => {
            let object = req.object()?;
            let text = require_str(object, "text")?;
            let page_id = optional_str(object, "page_id");
            let discussion_id = optional_str(object, "discussion_id");
            if page_id.is_none() && discussion_id.is_none() {
                return Err(respond::bad_request(
                    "one of page_id or discussion_id is required",
                ));
            }
            respond::vendor(notion.create_comment(page_id, discussion_id, text).await)
        }
        (&Method::GET, ["comments", block_id]) => {
            respond::vendor(notion.get_comments(block_id).await)
        }
        _ => respond::not_found(),
    })
}
