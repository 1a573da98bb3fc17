use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::discord::DiscordConnector;
use hyper::Method;
use serde_json::Value;

/// Always registered: bot-scoped calls report a missing credential at call
/// time when no bot token was configured, while `GET /me` works with just the
/// caller's own OAuth bearer.
pub struct DiscordApi {
    connector: DiscordConnector,
}

impl DiscordApi {
    pub fn new(connector: DiscordConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for DiscordApi {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        handle(&self.connector, req)
            .await
            .unwrap_or_else(|reply| reply)
    }
}

async fn handle(discord: &DiscordConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["me"]) => {
            let token = req.require_bearer()?;
            respond::vendor(discord.me(token).await)
        }
        (&Method::GET, ["users", user_id]) => respond::vendor(discord.get_user(user_id).await),
        (&Method::POST, ["users", user_id, "dm"]) => {
            respond::vendor(discord.create_dm(user_id).await)
        }
        (&Method::POST, ["users", user_id, "messages"]) => {
            let object = req.object()?;
            let content = require_str(object, "content")?;
            respond::vendor(discord.send_dm(user_id, content).await)
        }
        (&Method::GET, ["channels", channel_id]) => {
            respond::vendor(discord.get_channel(channel_id).await)
        }
        (&Method::PATCH, ["channels", channel_id]) => {
            let object = req.object()?;
            respond::vendor(
                discord
                    .modify_channel(channel_id, &Value::Object(object.clone()))
                    .await,
            )
        }
        (&Method::DELETE, ["channels", channel_id]) => {
            respond::vendor(discord.delete_channel(channel_id).await)
        }
        (&Method::POST, ["channels", channel_id, "messages"]) => {
            let object = req.object()?;
            let content = require_str(object, "content")?;
            respond::vendor(discord.send_message(channel_id, content).await)
        }
        (&Method::GET, ["channels", channel_id, "messages"]) => respond::vendor(
            discord
                .channel_messages(channel_id, req.query_param("limit"))
                .await,
        ),
        (&Method::GET, ["channels", channel_id, "messages", message_id]) => {
            respond::vendor(discord.get_message(channel_id, message_id).await)
        }
        (&Method::PATCH, ["channels", channel_id, "messages", message_id]) => {
            let object = req.object()?;
            let content = require_str(object, "content")?;
            respond::vendor(discord.edit_message(channel_id, message_id, content).await)
        }
        (&Method::DELETE, ["channels", channel_id, "messages", message_id]) => {
            respond::vendor(discord.delete_message(channel_id, message_id).await)
        }
        (&Method::POST, ["channels", channel_id, "messages", "bulk-delete"]) => {
            let object = req.object()?;
            let message_ids = object
                .get("message_ids")
                .ok_or_else(|| respond::bad_request("missing required field: message_ids"))?;
            respond::vendor(discord.bulk_delete_messages(channel_id, message_ids).await)
        }
        (&Method::PUT, ["channels", channel_id, "messages", message_id, "reactions"]) => {
            let object = req.object()?;
            let emoji = require_str(object, "emoji")?;
            respond::vendor(discord.add_reaction(channel_id, message_id, emoji).await)
        }
        (&Method::DELETE, ["channels", channel_id, "messages", message_id, "reactions"]) => {
            let emoji = req.require_query("emoji")?;
            respond::vendor(discord.remove_reaction(channel_id, message_id, emoji).await)
        }
        (&Method::GET, ["channels", channel_id, "messages", message_id, "reactions"]) => {
            let emoji = req.require_query("emoji")?;
            respond::vendor(discord.get_reactions(channel_id, message_id, emoji).await)
        }
        (&Method::GET, ["guilds", guild_id]) => respond::vendor(discord.get_guild(guild_id).await),
        (&Method::GET, ["guilds", guild_id, "channels"]) => {
            respond::vendor(discord.guild_channels(guild_id).await)
        }
        (&Method::POST, ["guilds", guild_id, "channels"]) => {
            let object = req.object()?;
            require_str(object, "name")?;
            respond::vendor(
                discord
                    .create_guild_channel(guild_id, &Value::Object(object.clone()))
                    .await,
            )
        }
        (&Method::GET, ["guilds", guild_id, "members"]) => respond::vendor(
            discord
                .list_guild_members(guild_id, req.query_param("limit"), req.query_param("after"))
                .await,
        ),
        (&Method::GET, ["guilds", guild_id, "members", user_id]) => {
            respond::vendor(discord.get_guild_member(guild_id, user_id).await)
        }
        (&Method::DELETE, ["guilds", guild_id, "members", user_id]) => {
            respond::vendor(discord.remove_guild_member(guild_id, user_id).await)
        }
        _ => respond::not_found(),
    })
}
