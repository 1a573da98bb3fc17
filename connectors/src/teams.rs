//! Microsoft Teams via the Graph API (`https://graph.microsoft.com/v1.0/`).
//!
//! Callers may supply their own delegated bearer token; otherwise an
//! app-only token is fetched per call from the tenant's client-credentials
//! endpoint. Tokens are not cached; each dispatch pays the extra call.

use crate::client::{Auth, CallResult, VendorClient, VendorResponse};
use serde_json::{Value, json};
use url::Url;

const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0/";
const LOGIN_BASE: &str = "https://login.microsoftonline.com/";

#[derive(Debug, Clone)]
pub struct TeamsConnector {
    graph: VendorClient,
    login: VendorClient,
    client_id: String,
    client_secret: String,
    tenant_id: String,
}

/// Either a usable bearer token or the token endpoint's error response,
/// which is passed through to the caller unchanged.
enum Token {
    Bearer(String),
    Failed(VendorResponse),
}

impl TeamsConnector {
    pub fn new(client_id: String, client_secret: String, tenant_id: String) -> Self {
        let graph_url = Url::parse(GRAPH_API_BASE).expect("valid Graph base URL");
        let login_url = Url::parse(LOGIN_BASE).expect("valid login base URL");
        Self::with_base_urls(client_id, client_secret, tenant_id, graph_url, login_url)
    }

    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        tenant_id: String,
        graph_url: Url,
        login_url: Url,
    ) -> Self {
        Self {
            graph: VendorClient::new(graph_url, Auth::None),
            login: VendorClient::new(login_url, Auth::None),
            client_id,
            client_secret,
            tenant_id,
        }
    }

    async fn token(&self, inbound: Option<&str>) -> Result<Token, crate::client::CallError> {
        if let Some(token) = inbound {
            return Ok(Token::Bearer(token.to_string()));
        }

        let response = self
            .login
            .post(format!("{}/oauth2/v2.0/token", self.tenant_id))
            .form(vec![
                ("client_id".into(), self.client_id.clone()),
                ("scope".into(), "https://graph.microsoft.com/.default".into()),
                ("client_secret".into(), self.client_secret.clone()),
                ("grant_type".into(), "client_credentials".into()),
            ])
            .send()
            .await?;

        if !response.is_success() {
            return Ok(Token::Failed(response));
        }
        match response.body["access_token"].as_str() {
            Some(token) => Ok(Token::Bearer(token.to_string())),
            None => Ok(Token::Failed(VendorResponse {
                status: 502,
                body: json!({"error": "token response missing access_token"}),
            })),
        }
    }

    async fn graph_get(&self, inbound: Option<&str>, path: String) -> CallResult {
        let token = match self.token(inbound).await? {
            Token::Bearer(token) => token,
            Token::Failed(response) => return Ok(response),
        };
        self.graph.get(path).bearer(&token).send().await
    }

    async fn graph_post(&self, inbound: Option<&str>, path: String, payload: Value) -> CallResult {
        let token = match self.token(inbound).await? {
            Token::Bearer(token) => token,
            Token::Failed(response) => return Ok(response),
        };
        self.graph.post(path).bearer(&token).json(payload).send().await
    }

    pub async fn joined_teams(&self, inbound: Option<&str>) -> CallResult {
        self.graph_get(inbound, "me/joinedTeams".into()).await
    }

    pub async fn team_details(&self, inbound: Option<&str>, team_id: &str) -> CallResult {
        self.graph_get(inbound, format!("teams/{team_id}")).await
    }

    pub async fn team_channels(&self, inbound: Option<&str>, team_id: &str) -> CallResult {
        self.graph_get(inbound, format!("teams/{team_id}/channels"))
            .await
    }

    pub async fn channel_info(
        &self,
        inbound: Option<&str>,
        team_id: &str,
        channel_id: &str,
    ) -> CallResult {
        self.graph_get(inbound, format!("teams/{team_id}/channels/{channel_id}"))
            .await
    }

    pub async fn list_chats(&self, inbound: Option<&str>) -> CallResult {
        self.graph_get(inbound, "me/chats".into()).await
    }

    pub async fn chat_messages(&self, inbound: Option<&str>, chat_id: &str) -> CallResult {
        self.graph_get(inbound, format!("chats/{chat_id}/messages"))
            .await
    }

    pub async fn send_channel_message(
        &self,
        inbound: Option<&str>,
        team_id: &str,
        channel_id: &str,
        content: &str,
    ) -> CallResult {
        let payload = json!({"body": {"content": content}});
        self.graph_post(
            inbound,
            format!("teams/{team_id}/channels/{channel_id}/messages"),
            payload,
        )
        .await
    }

    pub async fn channel_messages(
        &self,
        inbound: Option<&str>,
        team_id: &str,
        channel_id: &str,
    ) -> CallResult {
        self.graph_get(
            inbound,
            format!("teams/{team_id}/channels/{channel_id}/messages"),
        )
        .await
    }

    pub async fn reply_to_channel_message(
        &self,
        inbound: Option<&str>,
        team_id: &str,
        channel_id: &str,
        message_id: &str,
        content: &str,
    ) -> CallResult {
        let payload = json!({"body": {"content": content}});
        self.graph_post(
            inbound,
            format!("teams/{team_id}/channels/{channel_id}/messages/{message_id}/replies"),
            payload,
        )
        .await
    }

    pub async fn team_members(&self, inbound: Option<&str>, team_id: &str) -> CallResult {
        self.graph_get(inbound, format!("teams/{team_id}/members"))
            .await
    }

    pub async fn get_user(&self, inbound: Option<&str>, user_id: &str) -> CallResult {
        self.graph_get(inbound, format!("users/{user_id}")).await
    }

    pub async fn me(&self, inbound: Option<&str>) -> CallResult {
        self.graph_get(inbound, "me".into()).await
    }

    pub async fn create_channel(
        &self,
        inbound: Option<&str>,
        team_id: &str,
        display_name: &str,
        description: Option<&str>,
    ) -> CallResult {
        let mut payload = json!({"displayName": display_name});
        if let Some(description) = description {
            payload["description"] = json!(description);
        }
        self.graph_post(inbound, format!("teams/{team_id}/channels"), payload)
            .await
    }
}
