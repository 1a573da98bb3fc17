use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::jira::JiraConnector;
use hyper::Method;

pub struct JiraApi {
    connector: Option<JiraConnector>,
}

impl JiraApi {
    pub fn new(connector: Option<JiraConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for JiraApi {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(jira) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(jira, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(jira: &JiraConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["myself"]) => respond::vendor(jira.myself().await),
        (&Method::GET, ["users"]) => {
            let account_id = req.require_query("account_id")?;
            respond::vendor(jira.get_user(account_id).await)
        }
        (&Method::GET, ["users", "search"]) => {
            respond::vendor(jira.search_users(req.query_param("query")).await)
        }
        (&Method::GET, ["projects"]) => respond::vendor(jira.list_projects().await),
        (&Method::GET, ["projects", key]) => respond::vendor(jira.get_project(key).await),
        (&Method::POST, ["issues"]) => {
            let object = req.object()?;
            let project_key = require_str(object, "project_key")?;
            let summary = require_str(object, "summary")?;
            let issue_type = optional_str(object, "issue_type").unwrap_or("Task");
            respond::vendor(
                jira.create_issue(project_key, summary, object.get("description"), issue_type)
                    .await,
            )
        }
        (&Method::GET, ["issues", key]) => respond::vendor(jira.get_issue(key).await),
        (&Method::PUT, ["issues", key]) => {
            let object = req.object()?;
            let fields = object.get("fields").ok_or_else(|| {
                respond::bad_request("missing required field: fields")
            })?;
            respond::vendor(jira.update_issue(key, fields).await)
        }
        (&Method::DELETE, ["issues", key]) => respond::vendor(jira.delete_issue(key).await),
        (&Method::PUT, ["issues", key, "assignee"]) => {
            let object = req.object()?;
            let account_id = require_str(object, "account_id")?;
            respond::vendor(jira.assign_issue(key, account_id).await)
        }
        (&Method::GET, ["issues", key, "transitions"]) => {
            respond::vendor(jira.get_transitions(key).await)
        }
        (&Method::POST, ["issues", key, "transitions"]) => {
            let object = req.object()?;
            let transition_id = require_str(object, "transition_id")?;
            respond::vendor(jira.transition_issue(key, transition_id).await)
        }
        (&Method::GET, ["issues", key, "comments"]) => respond::vendor(jira.get_comments(key).await),
        (&Method::POST, ["issues", key, "comments"]) => {
            let object = req.object()?;
            let body = object.get("body").ok_or_else(|| {
                respond::bad_request("missing required field: body")
            })?;
            respond::vendor(jira.add_comment(key, body).await)
        }
        (&Method::PUT, ["issues", key, "comments", comment_id]) => {
            let object = req.object()?;
            let body = object.get("body").ok_or_else(|| {
                respond::bad_request("missing required field: body")
            })?;
            respond::vendor(jira.update_comment(key, comment_id, body).await)
        }
        (&Method::DELETE, ["issues", key, "comments", comment_id]) => {
            respond::vendor(jira.delete_comment(key, comment_id).await)
        }
        _ => respond::not_found(),
    })
}
