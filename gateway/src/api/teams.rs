use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::teams::TeamsConnector;
use hyper::Method;

pub struct TeamsApi {
    connector: Option<TeamsConnector>,
}

impl TeamsApi {
    pub fn new(connector: Option<TeamsConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for TeamsApi {
    fn name(&self) -> &'static str {
        "teams"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(teams) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(teams, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(teams: &TeamsConnector, req: ApiRequest) -> RouteResult {
    // A caller-supplied bearer is forwarded to Graph; otherwise the
    // connector fetches an app token with its client credentials.
    let inbound = req.bearer.as_deref();
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["me"]) => respond::vendor(teams.me(inbound).await),
        (&Method::GET, ["teams"]) => respond::vendor(teams.joined_teams(inbound).await),
        (&Method::GET, ["teams", team_id]) => {
            respond::vendor(teams.team_details(inbound, team_id).await)
        }
        (&Method::GET, ["teams", team_id, "channels"]) => {
            respond::vendor(teams.team_channels(inbound, team_id).await)
        }
        (&Method::POST, ["teams", team_id, "channels"]) => {
            let object = req.object()?;
            let display_name = require_str(object, "display_name")?;
            respond::vendor(
                teams
                    .create_channel(
                        inbound,
                        team_id,
                        display_name,
                        optional_str(object, "description"),
                    )
                    .await,
            )
        }
        (&Method::GET, ["teams", team_id, "channels", channel_id]) => {
            respond::vendor(teams.channel_info(inbound, team_id, channel_id).await)
        }
        (&Method::GET, ["teams", team_id, "channels", channel_id, "messages"]) => {
            respond::vendor(teams.channel_messages(inbound, team_id, channel_id).await)
        }
        (&Method::POST, ["teams", team_id, "channels", channel_id, "messages"]) => {
            let object = req.object()?;
            let content = require_str(object, "content")?;
            respond::vendor(
                teams
                    .send_channel_message(inbound, team_id, channel_id, content)
                    .await,
            )
        }
        (
            &Method::POST,
            ["teams", team_id, "channels", channel_id, "messages", message_id, "replies"],
        ) => {
            let object = req.object()?;
            let content = require_str(object, "content")?;
            respond::vendor(
                teams
                    .reply_to_channel_message(inbound, team_id, channel_id, message_id, content)
                    .await,
            )
        }
        (&Method::GET, ["teams", team_id, "members"]) => {
            respond::vendor(teams.team_members(inbound, team_id).await)
        }
        (&Method::GET, ["chats"]) => respond::vendor(teams.list_chats(inbound).await),
        (&Method::GET, ["chats", chat_id, "messages"]) => {
            respond::vendor(teams.chat_messages(inbound, chat_id).await)
        }
        (&Method::GET, ["users", user_id]) => {
            respond::vendor(teams.get_user(inbound, user_id).await)
        }
        _ => respond::not_found(),
    })
}
