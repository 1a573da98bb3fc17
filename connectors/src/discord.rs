//! Discord REST API (`https://discord.com/api/`). Most operations need the
//! configured bot token; `/users/@me` instead forwards the inbound caller's
//! OAuth bearer. The bot token is optional at startup, so bot-scoped calls
//! fail with a missing-credential error rather than an anonymous request.

use crate::client::{Auth, CallError, CallResult, VendorClient};
use serde_json::{Value, json};
use url::Url;
use url::form_urlencoded::byte_serialize;

const DISCORD_API_BASE: &str = "https://discord.com/api/";

#[derive(Debug, Clone)]
pub struct DiscordConnector {
    bot: Option<VendorClient>,
    open: VendorClient,
}

impl DiscordConnector {
    pub fn new(bot_token: Option<String>) -> Self {
        let base_url = Url::parse(DISCORD_API_BASE).expect("valid Discord base URL");
        Self::with_base_url(bot_token, base_url)
    }

    pub fn with_base_url(bot_token: Option<String>, base_url: Url) -> Self {
        Self {
            bot: bot_token.map(|t| VendorClient::new(base_url.clone(), Auth::Bot(t))),
            open: VendorClient::new(base_url, Auth::None),
        }
    }

    fn bot(&self) -> Result<&VendorClient, CallError> {
        self.bot
            .as_ref()
            .ok_or(CallError::MissingCredential("DISCORD_BOT_TOKEN"))
    }

    /// Identity of the inbound caller, not the bot.
    pub async fn me(&self, token: &str) -> CallResult {
        self.open.get("users/@me").bearer(token).send().await
    }

    pub async fn get_user(&self, user_id: &str) -> CallResult {
        self.bot()?.get(format!("users/{user_id}")).send().await
    }

    pub async fn create_dm(&self, user_id: &str) -> CallResult {
        self.bot()?
            .post("users/@me/channels")
            .json(json!({"recipient_id": user_id}))
            .send()
            .await
    }

    /// Open (or reuse) the DM channel, then post into it. The first vendor
    /// rejection short-circuits the chain.
    pub async fn send_dm(&self, user_id: &str, content: &str) -> CallResult {
        let channel = self.create_dm(user_id).await?;
        if !channel.is_success() {
            return Ok(channel);
        }
        match channel.body["id"].as_str() {
            Some(channel_id) => self.send_message(channel_id, content).await,
            None => Ok(crate::client::VendorResponse {
                status: 502,
                body: json!({"error": "DM channel response missing id"}),
            }),
        }
    }

    pub async fn get_channel(&self, channel_id: &str) -> CallResult {
        self.bot()?
            .get(format!("channels/{channel_id}"))
            .send()
            .await
    }

    pub async fn modify_channel(&self, channel_id: &str, updates: &Value) -> CallResult {
        self.bot()?
            .patch(format!("channels/{channel_id}"))
            .json(updates.clone())
            .send()
            .await
    }

    pub async fn delete_channel(&self, channel_id: &str) -> CallResult {
        self.bot()?
            .delete(format!("channels/{channel_id}"))
            .send()
            .await
    }

    pub async fn send_message(&self, channel_id: &str, content: &str) -> CallResult {
        self.bot()?
            .post(format!("channels/{channel_id}/messages"))
            .json(json!({"content": content}))
            .send()
            .await
    }

    pub async fn channel_messages(&self, channel_id: &str, limit: Option<&str>) -> CallResult {
        self.bot()?
            .get(format!("channels/{channel_id}/messages"))
            .query_opt("limit", limit)
            .send()
            .await
    }

    pub async fn get_message(&self, channel_id: &str, message_id: &str) -> CallResult {
        self.bot()?
            .get(format!("channels/{channel_id}/messages/{message_id}"))
            .send()
            .await
    }

    pub async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &str,
    ) -> CallResult {
        self.bot()?
            .patch(format!("channels/{channel_id}/messages/{message_id}"))
            .json(json!({"content": content}))
            .send()
            .await
    }

    pub async fn delete_message(&self, channel_id: &str, message_id: &str) -> CallResult {
        self.bot()?
            .delete(format!("channels/{channel_id}/messages/{message_id}"))
            .send()
            .await
    }

    pub async fn bulk_delete_messages(&self, channel_id: &str, message_ids: &Value) -> CallResult {
        self.bot()?
            .post(format!("channels/{channel_id}/messages/bulk-delete"))
            .json(json!({"messages": message_ids}))
            .send()
            .await
    }

    pub async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> CallResult {
        self.bot()?
            .put(format!(
                "channels/{channel_id}/messages/{message_id}/reactions/{}/@me",
                encode_emoji(emoji)
            ))
            .send()
            .await
    }

    pub async fn remove_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> CallResult {
        self.bot()?
            .delete(format!(
                "channels/{channel_id}/messages/{message_id}/reactions/{}/@me",
                encode_emoji(emoji)
            ))
            .send()
            .await
    }

    pub async fn get_reactions(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> CallResult {
        self.bot()?
            .get(format!(
                "channels/{channel_id}/messages/{message_id}/reactions/{}",
                encode_emoji(emoji)
            ))
            .send()
            .await
    }

    pub async fn get_guild(&self, guild_id: &str) -> CallResult {
        self.bot()?.get(format!("guilds/{guild_id}")).send().await
    }

    pub async fn guild_channels(&self, guild_id: &str) -> CallResult {
        self.bot()?
            .get(format!("guilds/{guild_id}/channels"))
            .send()
            .await
    }

    pub async fn create_guild_channel(&self, guild_id: &str, channel: &Value) -> CallResult {
        self.bot()?
            .post(format!("guilds/{guild_id}/channels"))
            .json(channel.clone())
            .send()
            .await
    }

    pub async fn get_guild_member(&self, guild_id: &str, user_id: &str) -> CallResult {
        self.bot()?
            .get(format!("guilds/{guild_id}/members/{user_id}"))
            .send()
            .await
    }

    pub async fn list_guild_members(
        &self,
        guild_id: &str,
        limit: Option<&str>,
        after: Option<&str>,
    ) -> CallResult {
        self.bot()?
            .get(format!("guilds/{guild_id}/members"))
            .query_opt("limit", limit)
            .query_opt("after", after)
            .send()
            .await
    }

    pub async fn remove_guild_member(&self, guild_id: &str, user_id: &str) -> CallResult {
        self.bot()?
            .delete(format!("guilds/{guild_id}/members/{user_id}"))
            .send()
            .await
    }
}

/// Reaction emoji live in the path and are usually multi-byte.
fn encode_emoji(emoji: &str) -> String {
    byte_serialize(emoji.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bot_token_is_a_credential_error() {
        let discord = DiscordConnector::new(None);
        assert!(matches!(
            discord.bot(),
            Err(CallError::MissingCredential("DISCORD_BOT_TOKEN"))
        ));
    }

    #[test]
    fn emoji_is_percent_encoded() {
        assert_eq!(encode_emoji("🔥"), "%F0%9F%94%A5");
        assert_eq!(encode_emoji("custom:12345"), "custom%3A12345");
    }
}
