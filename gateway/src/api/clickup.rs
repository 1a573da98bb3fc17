use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::clickup::ClickUpConnector;
use hyper::Method;
use serde_json::Value;

pub struct ClickUpApi {
    connector: Option<ClickUpConnector>,
}

impl ClickUpApi {
    pub fn new(connector: Option<ClickUpConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for ClickUpApi {
    fn name(&self) -> &'static str {
        "clickup"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(clickup) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(clickup, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(clickup: &ClickUpConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["user"]) => respond::vendor(clickup.authorized_user().await),
        (&Method::GET, ["teams"]) => respond::vendor(clickup.teams().await),
        (&Method::GET, ["teams", team_id, "spaces"]) => {
            respond::vendor(clickup.spaces(team_id).await)
        }
        (&Method::GET, ["spaces", space_id, "folders"]) => {
            respond::vendor(clickup.folders(space_id).await)
        }
        (&Method::GET, ["folders", folder_id, "lists"]) => {
            respond::vendor(clickup.lists(folder_id).await)
        }
        (&Method::GET, ["lists", list_id, "tasks"]) => {
            respond::vendor(clickup.tasks(list_id).await)
        }
        (&Method::POST, ["lists", list_id, "tasks"]) => {
            let object = req.object()?;
            require_str(object, "name")?;
            respond::vendor(clickup.create_task(list_id, object).await)
        }
        (&Method::GET, ["lists", list_id, "fields"]) => {
            respond::vendor(clickup.list_custom_fields(list_id).await)
        }
        (&Method::GET, ["tasks", task_id]) => respond::vendor(clickup.get_task(task_id).await),
        (&Method::PUT, ["tasks", task_id]) => {
            let object = req.object()?;
            respond::vendor(
                clickup
                    .update_task(task_id, &Value::Object(object.clone()))
                    .await,
            )
        }
        (&Method::DELETE, ["tasks", task_id]) => {
            respond::vendor(clickup.delete_task(task_id).await)
        }
        (&Method::GET, ["tasks", task_id, "comments"]) => {
            respond::vendor(clickup.task_comments(task_id).await)
        }
        (&Method::POST, ["tasks", task_id, "comments"]) => {
            let object = req.object()?;
            let text = require_str(object, "comment_text")?;
            respond::vendor(clickup.create_comment(task_id, text).await)
        }
        (&Method::POST, ["tasks", task_id, "fields", field_id]) => {
            let object = req.object()?;
            let value = object.get("value").ok_or_else(|| {
                respond::bad_request("missing required field: value")
            })?;
            respond::vendor(clickup.set_custom_field(task_id, field_id, value).await)
        }
        (&Method::DELETE, ["tasks", task_id, "fields", field_id]) => {
            respond::vendor(clickup.remove_custom_field(task_id, field_id).await)
        }
        (&Method::PUT, ["comments", comment_id]) => {
            let object = req.object()?;
            let text = require_str(object, "comment_text")?;
            respond::vendor(clickup.update_comment(comment_id, text).await)
        }
        (&Method::DELETE, ["comments", comment_id]) => {
            respond::vendor(clickup.delete_comment(comment_id).await)
        }
        _ => respond::not_found(),
    })
}
