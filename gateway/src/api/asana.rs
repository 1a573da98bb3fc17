use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::asana::{AsanaConnector, FavoriteProject};
use hyper::{Method, StatusCode};
use serde_json::Value;

pub struct AsanaApi {
    connector: Option<AsanaConnector>,
}

impl AsanaApi {
    pub fn new(connector: Option<AsanaConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for AsanaApi {
    fn name(&self) -> &'static str {
        "asana"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(asana) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(asana, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(asana: &AsanaConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["me"]) => respond::vendor(asana.get_me().await),
        (&Method::GET, ["users", gid]) => respond::vendor(asana.get_user(gid).await),
        (&Method::GET, ["workspaces"]) => respond::vendor(asana.get_workspaces().await),
        (&Method::GET, ["workspaces", gid]) => respond::vendor(asana.get_workspace(gid).await),
        (&Method::GET, ["workspaces", gid, "users"]) => respond::vendor(asana.get_users(gid).await),
        (&Method::GET, ["workspaces", gid, "projects"]) => {
            respond::vendor(asana.get_projects(gid).await)
        }
        (&Method::GET, ["workspaces", gid, "tags"]) => respond::vendor(asana.get_tags(gid).await),
        (&Method::GET, ["workspaces", gid, "tasks", "search"]) => {
            let filters = req
                .query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            respond::vendor(asana.search_tasks(gid, &filters).await)
        }
        (&Method::POST, ["projects"]) => {
            let object = req.object()?;
            let workspace = require_str(object, "workspace")?;
            let name = require_str(object, "name")?;
            respond::vendor(
                asana
                    .create_project(
                        workspace,
                        name,
                        optional_str(object, "notes"),
                        optional_str(object, "team"),
                    )
                    .await,
            )
        }
        (&Method::GET, ["projects", gid]) => respond::vendor(asana.get_project(gid).await),
        (&Method::PUT, ["projects", gid]) => {
            let object = req.object()?;
            respond::vendor(asana.update_project(gid, &Value::Object(object.clone())).await)
        }
        (&Method::DELETE, ["projects", gid]) => respond::vendor(asana.delete_project(gid).await),
        (&Method::GET, ["projects", gid, "tasks"]) => respond::vendor(asana.get_tasks(gid).await),
        (&Method::GET, ["projects", gid, "sections"]) => {
            respond::vendor(asana.get_sections(gid).await)
        }
        (&Method::POST, ["projects", gid, "sections"]) => {
            let object = req.object()?;
            let name = require_str(object, "name")?;
            respond::vendor(asana.create_section(gid, name).await)
        }
        (&Method::POST, ["projects", gid, "duplicate"]) => {
            respond::vendor(asana.duplicate_project(gid).await)
        }
        (&Method::POST, ["task"]) => {
            let object = req.object()?;
            require_str(object, "name")?;
            // Asana rejects tasks that name neither container; catch it
            // before the outbound call.
            let has_workspace = object.get("workspace").is_some();
            let has_projects = object
                .get("projects")
                .and_then(Value::as_array)
                .is_some_and(|p| !p.is_empty());
            if !has_workspace && !has_projects {
                return Err(respond::bad_request(
                    "task requires a workspace or at least one project",
                ));
            }
            respond::vendor(asana.create_task(object).await)
        }
        (&Method::GET, ["tasks", gid]) => respond::vendor(asana.get_task(gid).await),
        (&Method::PUT, ["tasks", gid]) => {
            let object = req.object()?;
            respond::vendor(asana.update_task(gid, &Value::Object(object.clone())).await)
        }
        (&Method::DELETE, ["tasks", gid]) => respond::vendor(asana.delete_task(gid).await),
        (&Method::GET, ["tasks", gid, "subtasks"]) => respond::vendor(asana.get_subtasks(gid).await),
        (&Method::POST, ["tasks", gid, "subtasks"]) => {
            let object = req.object()?;
            require_str(object, "name")?;
            respond::vendor(asana.add_subtask(gid, object).await)
        }
        (&Method::POST, ["tasks", gid, "complete"]) => {
            respond::vendor(asana.mark_task_complete(gid).await)
        }
        (&Method::POST, ["tasks", gid, "assign"]) => {
            let object = req.object()?;
            let assignee = require_str(object, "assignee")?;
            respond::vendor(asana.assign_task(gid, assignee).await)
        }
        (&Method::POST, ["tasks", gid, "due_date"]) => {
            let object = req.object()?;
            let due_on = require_str(object, "due_on")?;
            respond::vendor(asana.set_due_date(gid, due_on).await)
        }
        (&Method::POST, ["tasks", gid, "comment"]) => {
            let object = req.object()?;
            let text = require_str(object, "text")?;
            respond::vendor(asana.create_comment(gid, text).await)
        }
        (&Method::GET, ["tasks", gid, "stories"]) => respond::vendor(asana.get_stories(gid).await),
        (&Method::GET, ["tasks", gid, "attachments"]) => {
            respond::vendor(asana.get_attachments(gid).await)
        }
        (&Method::POST, ["tasks", gid, "tags"]) => {
            let object = req.object()?;
            let tag = require_str(object, "tag")?;
            respond::vendor(asana.add_tag_to_task(gid, tag).await)
        }
        (&Method::DELETE, ["tasks", gid, "tags", tag_gid]) => {
            respond::vendor(asana.remove_tag_from_task(gid, tag_gid).await)
        }
        (&Method::POST, ["tags"]) => {
            let object = req.object()?;
            let workspace = require_str(object, "workspace")?;
            let name = require_str(object, "name")?;
            respond::vendor(asana.create_tag(workspace, name).await)
        }
        (&Method::POST, ["sections", gid, "tasks"]) => {
            let object = req.object()?;
            let task = require_str(object, "task")?;
            respond::vendor(asana.add_task_to_section(gid, task).await)
        }
        (&Method::GET, ["organizations", gid, "teams"]) => {
            respond::vendor(asana.get_teams(gid).await)
        }
        (&Method::GET, ["teams", gid, "projects"]) => {
            respond::vendor(asana.get_team_projects(gid).await)
        }
        (&Method::GET, ["teams", gid, "users"]) => respond::vendor(asana.get_team_users(gid).await),
        // Favorites never touch the vendor; they live in the in-process
        // registry keyed by user gid.
        (&Method::POST, ["favorites"]) => {
            let object = req.object()?;
            let user_gid = require_str(object, "user_gid")?;
            let project = FavoriteProject {
                project_gid: require_str(object, "project_gid")?.to_string(),
                project_name: require_str(object, "project_name")?.to_string(),
                permalink_url: optional_str(object, "permalink_url")
                    .unwrap_or_default()
                    .to_string(),
            };
            respond::json(StatusCode::OK, &asana.add_favorite(user_gid, project))
        }
        (&Method::GET, ["favorites", user_gid]) => {
            respond::json(StatusCode::OK, &asana.list_favorites(user_gid))
        }
        (&Method::DELETE, ["favorites", user_gid, project_gid]) => {
            respond::json(StatusCode::OK, &asana.remove_favorite(user_gid, project_gid))
        }
        _ => respond::not_found(),
    })
}
