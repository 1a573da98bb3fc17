//! Asana REST API (`https://app.asana.com/api/1.0/`). Personal access token
//! bearer auth. Asana wraps every payload in a `data` envelope.
//!
//! Besides the plain endpoint wrappers this module carries the gateway's two
//! non-trivial pieces: the in-memory favorites registry and the sequential
//! duplicate-project workflow.

use crate::client::{Auth, CallError, CallResult, VendorClient, VendorResponse};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use url::Url;

pub mod favorites;

pub use favorites::{FavoriteProject, FavoriteStore, MemoryFavoriteStore};

const ASANA_API_BASE: &str = "https://app.asana.com/api/1.0/";

#[derive(Clone)]
pub struct AsanaConnector {
    client: VendorClient,
    favorites: Arc<dyn FavoriteStore>,
}

impl AsanaConnector {
    pub fn new(pat: String) -> Self {
        let base_url = Url::parse(ASANA_API_BASE).expect("valid Asana base URL");
        Self::with_base_url(pat, base_url)
    }

    pub fn with_base_url(pat: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Bearer(pat)),
            favorites: Arc::new(MemoryFavoriteStore::new()),
        }
    }

    pub fn with_favorite_store(mut self, store: Arc<dyn FavoriteStore>) -> Self {
        self.favorites = store;
        self
    }

    pub async fn get_me(&self) -> CallResult {
        self.client.get("users/me").send().await
    }

    pub async fn get_user(&self, user_gid: &str) -> CallResult {
        self.client.get(format!("users/{user_gid}")).send().await
    }

    pub async fn get_users(&self, workspace_gid: &str) -> CallResult {
        self.client
            .get(format!("workspaces/{workspace_gid}/users"))
            .send()
            .await
    }

    pub async fn get_workspaces(&self) -> CallResult {
        self.client.get("workspaces").send().await
    }

    pub async fn get_workspace(&self, workspace_gid: &str) -> CallResult {
        self.client
            .get(format!("workspaces/{workspace_gid}"))
            .send()
            .await
    }

    pub async fn get_projects(&self, workspace_gid: &str) -> CallResult {
        self.client
            .get("projects")
            .query("workspace", workspace_gid)
            .send()
            .await
    }

    pub async fn get_project(&self, project_gid: &str) -> CallResult {
        self.client
            .get(format!("projects/{project_gid}"))
            .send()
            .await
    }

    pub async fn create_project(
        &self,
        workspace_gid: &str,
        name: &str,
        notes: Option<&str>,
        team_gid: Option<&str>,
    ) -> CallResult {
        let mut data = json!({"name": name, "workspace": workspace_gid});
        if let Some(notes) = notes {
            data["notes"] = json!(notes);
        }
        if let Some(team_gid) = team_gid {
            data["team"] = json!(team_gid);
        }
        self.client
            .post("projects")
            .json(json!({"data": data}))
            .send()
            .await
    }

    pub async fn update_project(&self, project_gid: &str, updates: &Value) -> CallResult {
        self.client
            .put(format!("projects/{project_gid}"))
            .json(json!({"data": updates}))
            .send()
            .await
    }

    pub async fn delete_project(&self, project_gid: &str) -> CallResult {
        self.client
            .delete(format!("projects/{project_gid}"))
            .send()
            .await
    }

    pub async fn get_tasks(&self, project_gid: &str) -> CallResult {
        self.client
            .get(format!("projects/{project_gid}/tasks"))
            .send()
            .await
    }

    pub async fn get_task(&self, task_gid: &str) -> CallResult {
        self.client.get(format!("tasks/{task_gid}")).send().await
    }

    /// Create a task from the caller's field bag; the route layer has already
    /// checked `name` and workspace/projects presence.
    pub async fn create_task(&self, fields: &Map<String, Value>) -> CallResult {
        self.client
            .post("tasks")
            .json(json!({"data": fields}))
            .send()
            .await
    }

    pub async fn update_task(&self, task_gid: &str, updates: &Value) -> CallResult {
        self.client
            .put(format!("tasks/{task_gid}"))
            .json(json!({"data": updates}))
            .send()
            .await
    }

    pub async fn delete_task(&self, task_gid: &str) -> CallResult {
        self.client.delete(format!("tasks/{task_gid}")).send().await
    }

    pub async fn get_subtasks(&self, task_gid: &str) -> CallResult {
        self.client
            .get(format!("tasks/{task_gid}/subtasks"))
            .send()
            .await
    }

    pub async fn add_subtask(&self, parent_task_gid: &str, fields: &Map<String, Value>) -> CallResult {
        self.client
            .post(format!("tasks/{parent_task_gid}/subtasks"))
            .json(json!({"data": fields}))
            .send()
            .await
    }

    pub async fn get_sections(&self, project_gid: &str) -> CallResult {
        self.client
            .get(format!("projects/{project_gid}/sections"))
            .send()
            .await
    }

    pub async fn create_section(&self, project_gid: &str, name: &str) -> CallResult {
        self.client
            .post(format!("projects/{project_gid}/sections"))
            .json(json!({"data": {"name": name}}))
            .send()
            .await
    }

    pub async fn add_task_to_section(&self, section_gid: &str, task_gid: &str) -> CallResult {
        self.client
            .post(format!("sections/{section_gid}/addTask"))
            .json(json!({"data": {"task": task_gid}}))
            .send()
            .await
    }

    pub async fn get_tags(&self, workspace_gid: &str) -> CallResult {
        self.client
            .get("tags")
            .query("workspace", workspace_gid)
            .send()
            .await
    }

    pub async fn create_tag(&self, workspace_gid: &str, name: &str) -> CallResult {
        self.client
            .post("tags")
            .json(json!({"data": {"name": name, "workspace": workspace_gid}}))
            .send()
            .await
    }

    pub async fn add_tag_to_task(&self, task_gid: &str, tag_gid: &str) -> CallResult {
        self.client
            .post(format!("tasks/{task_gid}/addTag"))
            .json(json!({"data": {"tag": tag_gid}}))
            .send()
            .await
    }

    pub async fn remove_tag_from_task(&self, task_gid: &str, tag_gid: &str) -> CallResult {
        self.client
            .post(format!("tasks/{task_gid}/removeTag"))
            .json(json!({"data": {"tag": tag_gid}}))
            .send()
            .await
    }

    /// Task comments are stories of type comment.
    pub async fn create_comment(&self, task_gid: &str, text: &str) -> CallResult {
        self.client
            .post(format!("tasks/{task_gid}/stories"))
            .json(json!({"data": {"text": text}}))
            .send()
            .await
    }

    pub async fn get_stories(&self, task_gid: &str) -> CallResult {
        self.client
            .get(format!("tasks/{task_gid}/stories"))
            .send()
            .await
    }

    pub async fn get_attachments(&self, task_gid: &str) -> CallResult {
        self.client
            .get("attachments")
            .query("parent", task_gid)
            .send()
            .await
    }

    pub async fn mark_task_complete(&self, task_gid: &str) -> CallResult {
        self.update_task(task_gid, &json!({"completed": true})).await
    }

    pub async fn assign_task(&self, task_gid: &str, assignee_gid: &str) -> CallResult {
        self.update_task(task_gid, &json!({"assignee": assignee_gid}))
            .await
    }

    pub async fn set_due_date(&self, task_gid: &str, due_on: &str) -> CallResult {
        self.update_task(task_gid, &json!({"due_on": due_on})).await
    }

    pub async fn get_teams(&self, organization_gid: &str) -> CallResult {
        self.client
            .get(format!("organizations/{organization_gid}/teams"))
            .send()
            .await
    }

    pub async fn get_team_projects(&self, team_gid: &str) -> CallResult {
        self.client
            .get(format!("teams/{team_gid}/projects"))
            .send()
            .await
    }

    pub async fn get_team_users(&self, team_gid: &str) -> CallResult {
        self.client.get(format!("teams/{team_gid}/users")).send().await
    }

    pub async fn search_tasks(
        &self,
        workspace_gid: &str,
        filters: &Map<String, Value>,
    ) -> CallResult {
        self.client
            .get(format!("workspaces/{workspace_gid}/tasks/search"))
            .query_map(filters)
            .send()
            .await
    }

    // Favorites live in process memory, not at Asana.

    pub fn add_favorite(&self, user_gid: &str, project: FavoriteProject) -> Value {
        let echoed = json!(&project);
        self.favorites.add(user_gid, project);
        json!({"message": "Project favorited", "data": echoed})
    }

    pub fn list_favorites(&self, user_gid: &str) -> Value {
        json!(self.favorites.list(user_gid))
    }

    pub fn remove_favorite(&self, user_gid: &str, project_gid: &str) -> Value {
        self.favorites.remove(user_gid, project_gid);
        json!({"message": "Project unfavorited"})
    }

    /// Sequential duplicate-project workflow: read the original, create
    /// `Copy of <name>`, then copy each task one at a time. No parallelism,
    /// no rollback: a failure partway through leaves the new project with a
    /// partial task set. Vendor errors on the initial read or the project
    /// create are passed through unchanged; a task copy that the vendor
    /// rejects is skipped rather than aborting the rest.
    pub async fn duplicate_project(&self, project_gid: &str) -> CallResult {
        let original = self.get_project(project_gid).await?;
        if !original.is_success() {
            return Ok(original);
        }

        let data = &original.body["data"];
        let original_name = data["name"].as_str().unwrap_or("").to_string();
        let Some(workspace_gid) = data["workspace"]["gid"].as_str().map(str::to_string) else {
            return Ok(VendorResponse {
                status: 502,
                body: json!({"error": "project response missing workspace gid"}),
            });
        };

        let created = self
            .create_project(&workspace_gid, &copy_name(&original_name), None, None)
            .await?;
        if !created.is_success() {
            return Ok(created);
        }
        let Some(new_project_gid) = created.body["data"]["gid"].as_str().map(str::to_string) else {
            return Ok(VendorResponse {
                status: 502,
                body: json!({"error": "create project response missing gid"}),
            });
        };

        let tasks = self.get_tasks(project_gid).await?;
        let task_refs = tasks.body["data"].as_array().cloned().unwrap_or_default();

        for task_ref in task_refs {
            let Some(task_gid) = task_ref["gid"].as_str() else {
                continue;
            };
            let detail = self.get_task(task_gid).await?;
            let task = &detail.body["data"];
            let copied = self
                .create_task_in_project(
                    task["name"].as_str().unwrap_or(""),
                    task["notes"].as_str().unwrap_or(""),
                    &new_project_gid,
                    &workspace_gid,
                )
                .await?;
            if !copied.is_success() {
                tracing::warn!(task_gid, status = copied.status, "task copy rejected");
            }
        }

        Ok(VendorResponse {
            status: 200,
            body: json!({
                "message": "Project duplicated",
                "original_project": original_name,
                "new_project_gid": new_project_gid,
                "new_project_url": format!("https://app.asana.com/0/{workspace_gid}/{new_project_gid}"),
            }),
        })
    }

    async fn create_task_in_project(
        &self,
        name: &str,
        notes: &str,
        project_gid: &str,
        workspace_gid: &str,
    ) -> Result<VendorResponse, CallError> {
        self.client
            .post("tasks")
            .json(json!({
                "data": {
                    "name": name,
                    "notes": notes,
                    "projects": [project_gid],
                    "workspace": workspace_gid,
                }
            }))
            .send()
            .await
    }
}

fn copy_name(original: &str) -> String {
    format!("Copy of {original}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_name_prefixes_original() {
        assert_eq!(copy_name("Roadmap"), "Copy of Roadmap");
        assert_eq!(copy_name(""), "Copy of ");
    }

    #[test]
    fn favorite_helpers_echo_registry_state() {
        let asana = AsanaConnector::new("pat".into());
        let project = FavoriteProject {
            project_gid: "p1".into(),
            project_name: "Roadmap".into(),
            permalink_url: "https://app.asana.com/0/p1".into(),
        };

        let added = asana.add_favorite("u1", project.clone());
        assert_eq!(added["message"], "Project favorited");
        assert_eq!(added["data"]["project_gid"], "p1");

        let listed = asana.list_favorites("u1");
        assert_eq!(listed[0]["project_name"], "Roadmap");

        asana.remove_favorite("u1", "p1");
        assert_eq!(asana.list_favorites("u1"), json!([]));
    }
}
