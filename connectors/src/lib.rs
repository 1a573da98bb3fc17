//! Vendor connectors: one module per SaaS API, all built on the shared
//! [`client::VendorClient`]. Connectors are constructed once at startup from
//! [`credentials::Credentials`] and shared read-only across requests.

pub mod asana;
pub mod client;
pub mod clickup;
pub mod credentials;
pub mod discord;
pub mod facebook;
pub mod instagram;
pub mod jira;
pub mod linkedin;
pub mod linkedin_sales;
pub mod monday;
pub mod notion;
pub mod salesforce;
pub mod slack;
pub mod teams;
pub mod whatsapp;

use credentials::Credentials;

/// Every connector the gateway can route to. A vendor whose credential is
/// absent stays `None` and its routes answer 401 without an outbound call.
/// LinkedIn and Discord are always present: their member routes authenticate
/// with the inbound caller's own token.
pub struct Connectors {
    pub slack: Option<slack::SlackConnector>,
    pub notion: Option<notion::NotionConnector>,
    pub teams: Option<teams::TeamsConnector>,
    pub asana: Option<asana::AsanaConnector>,
    pub clickup: Option<clickup::ClickUpConnector>,
    pub jira: Option<jira::JiraConnector>,
    pub monday: Option<monday::MondayConnector>,
    pub salesforce: Option<salesforce::SalesforceConnector>,
    pub linkedin: linkedin::LinkedInConnector,
    pub linkedin_sales: Option<linkedin_sales::SalesNavConnector>,
    pub discord: discord::DiscordConnector,
    pub instagram: Option<instagram::InstagramConnector>,
    pub facebook: Option<facebook::FacebookConnector>,
    pub whatsapp: Option<whatsapp::WhatsAppConnector>,
}

impl Connectors {
    pub fn from_credentials(creds: &Credentials, simulation: bool) -> Self {
        let jira = creds.jira.as_ref().and_then(|j| {
            match jira::JiraConnector::new(j.email.clone(), j.api_token.clone(), &j.base_url) {
                Ok(connector) => Some(connector),
                Err(err) => {
                    tracing::warn!(error = %err, "invalid Jira base URL, vendor disabled");
                    None
                }
            }
        });
        let salesforce = creds.salesforce.as_ref().and_then(|s| {
            match salesforce::SalesforceConnector::new(s.access_token.clone(), &s.instance_url) {
                Ok(connector) => Some(connector),
                Err(err) => {
                    tracing::warn!(error = %err, "invalid Salesforce instance URL, vendor disabled");
                    None
                }
            }
        });

        Connectors {
            slack: creds
                .slack_bot_token
                .clone()
                .map(slack::SlackConnector::new),
            notion: creds.notion_token.clone().map(|token| {
                let version = creds
                    .notion_version
                    .clone()
                    .unwrap_or_else(|| notion::DEFAULT_NOTION_VERSION.to_string());
                notion::NotionConnector::new(token, version)
            }),
            teams: creds.ms_graph.as_ref().map(|g| {
                teams::TeamsConnector::new(
                    g.client_id.clone(),
                    g.client_secret.clone(),
                    g.tenant_id.clone(),
                )
            }),
            asana: creds.asana_pat.clone().map(asana::AsanaConnector::new),
            clickup: creds
                .clickup_api_token
                .clone()
                .map(clickup::ClickUpConnector::new),
            jira,
            monday: creds
                .monday_api_key
                .clone()
                .map(monday::MondayConnector::new),
            salesforce,
            linkedin: linkedin::LinkedInConnector::new(),
            linkedin_sales: creds
                .linkedin_access_token
                .clone()
                .map(|token| linkedin_sales::SalesNavConnector::new(token, simulation)),
            discord: discord::DiscordConnector::new(creds.discord_bot_token.clone()),
            instagram: creds.instagram.as_ref().map(|i| {
                instagram::InstagramConnector::new(i.access_token.clone(), i.user_id.clone())
            }),
            facebook: creds
                .facebook_access_token
                .clone()
                .map(facebook::FacebookConnector::new),
            whatsapp: creds.whatsapp.as_ref().map(|w| {
                whatsapp::WhatsAppConnector::new(w.access_token.clone(), w.phone_number_id.clone())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_vendors_stay_disabled() {
        let connectors = Connectors::from_credentials(&Credentials::default(), false);
        assert!(connectors.slack.is_none());
        assert!(connectors.jira.is_none());
        assert!(connectors.whatsapp.is_none());
    }

    #[test]
    fn configured_vendors_come_up() {
        let creds = Credentials {
            slack_bot_token: Some("xoxb-1".into()),
            monday_api_key: Some("key".into()),
            ..Credentials::default()
        };
        let connectors = Connectors::from_credentials(&creds, false);
        assert!(connectors.slack.is_some());
        assert!(connectors.monday.is_some());
        assert!(connectors.notion.is_none());
    }
}
