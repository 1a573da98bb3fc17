//! Jira Cloud REST API v3 (`{instance}/rest/api/3/`). Basic auth with the
//! account email and an API token.

use crate::client::{Auth, CallError, CallResult, VendorClient};
use serde_json::{Map, Value, json};
use url::Url;

#[derive(Debug, Clone)]
pub struct JiraConnector {
    client: VendorClient,
}

impl JiraConnector {
    pub fn new(email: String, api_token: String, base_url: &str) -> Result<Self, CallError> {
        // Jira instances are customer-specific, so the base URL comes from
        // configuration rather than a constant.
        let trimmed = format!("{}/rest/api/3/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&trimmed).map_err(|e| CallError::Url(format!("{trimmed}: {e}")))?;
        Ok(Self {
            client: VendorClient::new(
                base_url,
                Auth::Basic {
                    user: email,
                    secret: api_token,
                },
            ),
        })
    }

    pub async fn myself(&self) -> CallResult {
        self.client.get("myself").send().await
    }

    pub async fn get_user(&self, account_id: &str) -> CallResult {
        self.client
            .get("user")
            .query("accountId", account_id)
            .send()
            .await
    }

    pub async fn search_users(&self, query: Option<&str>) -> CallResult {
        self.client
            .get("users/search")
            .query_opt("query", query)
            .send()
            .await
    }

    pub async fn list_projects(&self) -> CallResult {
        self.client.get("project").send().await
    }

    pub async fn get_project(&self, project_id_or_key: &str) -> CallResult {
        self.client
            .get(format!("project/{project_id_or_key}"))
            .send()
            .await
    }

    pub async fn get_issue(&self, issue_id_or_key: &str) -> CallResult {
        self.client
            .get(format!("issue/{issue_id_or_key}"))
            .send()
            .await
    }

    pub async fn create_issue(
        &self,
        project_key: &str,
        summary: &str,
        description: Option<&Value>,
        issue_type: &str,
    ) -> CallResult {
        let payload = build_issue_payload(project_key, summary, description, issue_type);
        self.client.post("issue").json(payload).send().await
    }

    pub async fn update_issue(&self, issue_id_or_key: &str, fields: &Value) -> CallResult {
        self.client
            .put(format!("issue/{issue_id_or_key}"))
            .json(json!({"fields": fields}))
            .send()
            .await
    }

    pub async fn delete_issue(&self, issue_id_or_key: &str) -> CallResult {
        self.client
            .delete(format!("issue/{issue_id_or_key}"))
            .send()
            .await
    }

    pub async fn assign_issue(&self, issue_id_or_key: &str, account_id: &str) -> CallResult {
        self.client
            .put(format!("issue/{issue_id_or_key}/assignee"))
            .json(json!({"accountId": account_id}))
            .send()
            .await
    }

    pub async fn get_transitions(&self, issue_id_or_key: &str) -> CallResult {
        self.client
            .get(format!("issue/{issue_id_or_key}/transitions"))
            .send()
            .await
    }

    pub async fn transition_issue(&self, issue_id_or_key: &str, transition_id: &str) -> CallResult {
        self.client
            .post(format!("issue/{issue_id_or_key}/transitions"))
            .json(json!({"transition": {"id": transition_id}}))
            .send()
            .await
    }

    pub async fn get_comments(&self, issue_id_or_key: &str) -> CallResult {
        self.client
            .get(format!("issue/{issue_id_or_key}/comment"))
            .send()
            .await
    }

    pub async fn add_comment(&self, issue_id_or_key: &str, body: &Value) -> CallResult {
        self.client
            .post(format!("issue/{issue_id_or_key}/comment"))
            .json(json!({"body": body}))
            .send()
            .await
    }

    pub async fn update_comment(
        &self,
        issue_id_or_key: &str,
        comment_id: &str,
        body: &Value,
    ) -> CallResult {
        self.client
            .put(format!("issue/{issue_id_or_key}/comment/{comment_id}"))
            .json(json!({"body": body}))
            .send()
            .await
    }

    pub async fn delete_comment(&self, issue_id_or_key: &str, comment_id: &str) -> CallResult {
        self.client
            .delete(format!("issue/{issue_id_or_key}/comment/{comment_id}"))
            .send()
            .await
    }
}

fn build_issue_payload(
    project_key: &str,
    summary: &str,
    description: Option<&Value>,
    issue_type: &str,
) -> Value {
    let mut fields = Map::new();
    fields.insert("project".into(), json!({"key": project_key}));
    fields.insert("summary".into(), json!(summary));
    if let Some(description) = description {
        fields.insert("description".into(), description.clone());
    }
    fields.insert("issuetype".into(), json!({"name": issue_type}));
    json!({"fields": fields})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_payload_shape() {
        let description = json!({"type": "doc", "version": 1, "content": []});
        let payload = build_issue_payload("OPS", "Broken build", Some(&description), "Bug");
        assert_eq!(payload["fields"]["project"]["key"], "OPS");
        assert_eq!(payload["fields"]["summary"], "Broken build");
        assert_eq!(payload["fields"]["issuetype"]["name"], "Bug");
        assert_eq!(payload["fields"]["description"]["type"], "doc");
    }

    #[test]
    fn issue_payload_omits_missing_description() {
        let payload = build_issue_payload("OPS", "Task", None, "Task");
        assert!(payload["fields"].get("description").is_none());
    }

    #[test]
    fn base_url_normalizes_trailing_slash() {
        let jira = JiraConnector::new(
            "me@example.com".into(),
            "token".into(),
            "https://example.atlassian.net/",
        )
        .unwrap();
        let _ = jira;
    }
}
