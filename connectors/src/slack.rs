//! Slack Web API (`https://slack.com/api/`). Bot-token bearer auth; every
//! method wraps exactly one API method of the same name.

use crate::client::{Auth, CallResult, VendorClient, merge_extra};
use serde_json::{Map, Value, json};
use url::Url;

const SLACK_API_BASE: &str = "https://slack.com/api/";

#[derive(Debug, Clone)]
pub struct SlackConnector {
    client: VendorClient,
}

impl SlackConnector {
    pub fn new(bot_token: String) -> Self {
        let base_url = Url::parse(SLACK_API_BASE).expect("valid Slack base URL");
        Self::with_base_url(bot_token, base_url)
    }

    pub fn with_base_url(bot_token: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Bearer(bot_token)),
        }
    }

    /// chat.postMessage
    pub async fn send_message(
        &self,
        channel: &str,
        text: &str,
        extra: &Map<String, Value>,
    ) -> CallResult {
        let mut payload = json!({"channel": channel, "text": text});
        merge_extra(&mut payload, extra, &["blocks", "attachments"]);
        self.client.post("chat.postMessage").json(payload).send().await
    }

    /// chat.update
    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        text: &str,
        extra: &Map<String, Value>,
    ) -> CallResult {
        let mut payload = json!({"channel": channel, "ts": ts, "text": text});
        merge_extra(&mut payload, extra, &["blocks"]);
        self.client.post("chat.update").json(payload).send().await
    }

    /// chat.delete
    pub async fn delete_message(&self, channel: &str, ts: &str) -> CallResult {
        let payload = json!({"channel": channel, "ts": ts});
        self.client.post("chat.delete").json(payload).send().await
    }

    /// chat.scheduleMessage
    pub async fn schedule_message(&self, channel: &str, text: &str, post_at: i64) -> CallResult {
        let payload = json!({"channel": channel, "text": text, "post_at": post_at});
        self.client
            .post("chat.scheduleMessage")
            .json(payload)
            .send()
            .await
    }

    /// conversations.list
    pub async fn list_channels(&self) -> CallResult {
        self.client
            .get("conversations.list")
            .query("limit", "1000")
            .query("types", "public_channel")
            .send()
            .await
    }

    /// conversations.history
    pub async fn channel_history(
        &self,
        channel: &str,
        limit: Option<&str>,
        cursor: Option<&str>,
    ) -> CallResult {
        self.client
            .get("conversations.history")
            .query("channel", channel)
            .query("limit", limit.unwrap_or("20"))
            .query_opt("cursor", cursor)
            .send()
            .await
    }

    /// conversations.replies
    pub async fn thread_replies(&self, channel: &str, ts: &str) -> CallResult {
        self.client
            .get("conversations.replies")
            .query("channel", channel)
            .query("ts", ts)
            .send()
            .await
    }

    /// conversations.join
    pub async fn join_channel(&self, channel: &str) -> CallResult {
        let payload = json!({"channel": channel});
        self.client
            .post("conversations.join")
            .json(payload)
            .send()
            .await
    }

    /// conversations.leave
    pub async fn leave_channel(&self, channel: &str) -> CallResult {
        let payload = json!({"channel": channel});
        self.client
            .post("conversations.leave")
            .json(payload)
            .send()
            .await
    }

    /// conversations.info
    pub async fn channel_info(&self, channel: &str) -> CallResult {
        self.client
            .get("conversations.info")
            .query("channel", channel)
            .send()
            .await
    }

    /// conversations.members
    pub async fn channel_members(&self, channel: &str) -> CallResult {
        self.client
            .get("conversations.members")
            .query("channel", channel)
            .send()
            .await
    }

    /// conversations.open
    pub async fn open_dm(&self, users: &str) -> CallResult {
        let payload = json!({"users": users});
        self.client
            .post("conversations.open")
            .json(payload)
            .send()
            .await
    }

    /// users.list
    pub async fn list_users(&self) -> CallResult {
        self.client.get("users.list").send().await
    }

    /// users.info
    pub async fn user_info(&self, user: &str) -> CallResult {
        self.client.get("users.info").query("user", user).send().await
    }

    /// users.profile.get
    pub async fn user_profile(&self, user: &str) -> CallResult {
        self.client
            .get("users.profile.get")
            .query("user", user)
            .send()
            .await
    }

    /// reactions.add
    pub async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> CallResult {
        let payload = json!({"channel": channel, "timestamp": ts, "name": name});
        self.client.post("reactions.add").json(payload).send().await
    }

    /// reactions.remove
    pub async fn remove_reaction(&self, channel: &str, ts: &str, name: &str) -> CallResult {
        let payload = json!({"channel": channel, "timestamp": ts, "name": name});
        self.client
            .post("reactions.remove")
            .json(payload)
            .send()
            .await
    }

    /// pins.add
    pub async fn pin_message(&self, channel: &str, ts: &str) -> CallResult {
        let payload = json!({"channel": channel, "timestamp": ts});
        self.client.post("pins.add").json(payload).send().await
    }

    /// pins.remove
    pub async fn unpin_message(&self, channel: &str, ts: &str) -> CallResult {
        let payload = json!({"channel": channel, "timestamp": ts});
        self.client.post("pins.remove").json(payload).send().await
    }

    /// pins.list
    pub async fn list_pins(&self, channel: &str) -> CallResult {
        self.client
            .get("pins.list")
            .query("channel", channel)
            .send()
            .await
    }
}
