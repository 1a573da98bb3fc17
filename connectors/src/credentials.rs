//! Per-vendor secrets, read once from the environment at startup and shared
//! read-only across requests. A vendor with no credential configured simply
//! has `None` here; its routes answer 401 without making any outbound call.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub slack_bot_token: Option<String>,
    pub notion_token: Option<String>,
    pub notion_version: Option<String>,
    pub ms_graph: Option<MsGraphCredentials>,
    pub asana_pat: Option<String>,
    pub clickup_api_token: Option<String>,
    pub jira: Option<JiraCredentials>,
    pub monday_api_key: Option<String>,
    pub salesforce: Option<SalesforceCredentials>,
    pub linkedin_access_token: Option<String>,
    pub discord_bot_token: Option<String>,
    pub instagram: Option<InstagramCredentials>,
    pub facebook_access_token: Option<String>,
    pub whatsapp: Option<WhatsAppCredentials>,
}

#[derive(Debug, Clone)]
pub struct MsGraphCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub email: String,
    pub api_token: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SalesforceCredentials {
    pub access_token: String,
    pub instance_url: String,
}

#[derive(Debug, Clone)]
pub struct InstagramCredentials {
    pub access_token: String,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct WhatsAppCredentials {
    pub access_token: String,
    pub phone_number_id: String,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Credentials {
    /// Read every vendor credential the gateway knows about. Missing
    /// variables are not an error; the vendor is just unconfigured.
    pub fn from_env() -> Self {
        let ms_graph = match (
            var("MS_CLIENT_ID"),
            var("MS_CLIENT_SECRET"),
            var("MS_TENANT_ID"),
        ) {
            (Some(client_id), Some(client_secret), Some(tenant_id)) => Some(MsGraphCredentials {
                client_id,
                client_secret,
                tenant_id,
            }),
            _ => None,
        };

        let jira = match (var("JIRA_EMAIL"), var("JIRA_API_TOKEN"), var("JIRA_BASE_URL")) {
            (Some(email), Some(api_token), Some(base_url)) => Some(JiraCredentials {
                email,
                api_token,
                base_url,
            }),
            _ => None,
        };

        let salesforce = match (
            var("SALESFORCE_SECURITY_TOKEN"),
            var("SALESFORCE_INSTANCE_URL"),
        ) {
            (Some(access_token), Some(instance_url)) => Some(SalesforceCredentials {
                access_token,
                instance_url,
            }),
            _ => None,
        };

        let instagram = match (var("INSTAGRAM_ACCESS_TOKEN"), var("INSTAGRAM_USER_ID")) {
            (Some(access_token), Some(user_id)) => Some(InstagramCredentials {
                access_token,
                user_id,
            }),
            _ => None,
        };

        let whatsapp = match (var("WHATSAPP_ACCESS_TOKEN"), var("WHATSAPP_PHONE_NUMBER_ID")) {
            (Some(access_token), Some(phone_number_id)) => Some(WhatsAppCredentials {
                access_token,
                phone_number_id,
            }),
            _ => None,
        };

        Credentials {
            slack_bot_token: var("SLACK_BOT_TOKEN"),
            notion_token: var("NOTION_TOKEN"),
            notion_version: var("NOTION_VERSION"),
            ms_graph,
            asana_pat: var("ASANA_PAT"),
            clickup_api_token: var("CLICKUP_API_TOKEN"),
            jira,
            monday_api_key: var("MONDAY_API_KEY"),
            salesforce,
            linkedin_access_token: var("LINKEDIN_ACCESS_TOKEN"),
            discord_bot_token: var("DISCORD_BOT_TOKEN"),
            instagram,
            facebook_access_token: var("FACEBOOK_ACCESS_TOKEN"),
            whatsapp,
        }
    }
}
