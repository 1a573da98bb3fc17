use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::slack::SlackConnector;
use hyper::Method;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct SlackApi {
    connector: Option<SlackConnector>,
}

impl SlackApi {
    pub fn new(connector: Option<SlackConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for SlackApi {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(slack) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(slack, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(slack: &SlackConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        // `send-message` is the historical operation path; `message` pairs
        // with the PUT/DELETE forms.
        (&Method::POST, ["message"] | ["send-message"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let text = require_str(object, "text")?;
            respond::vendor(slack.send_message(channel, text, object).await)
        }
        (&Method::PUT, ["message"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            let text = require_str(object, "text")?;
            respond::vendor(slack.update_message(channel, ts, text, object).await)
        }
        (&Method::DELETE, ["message"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            respond::vendor(slack.delete_message(channel, ts).await)
        }
        (&Method::POST, ["message", "schedule"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let text = require_str(object, "text")?;
            let minutes = object
                .get("minutes_from_now")
                .and_then(serde_json::Value::as_i64)
                .ok_or_else(|| {
                    respond::bad_request("missing required field: minutes_from_now")
                })?;
            // Caller-controlled arithmetic; saturate instead of overflowing.
            let post_at = unix_now().saturating_add(minutes.saturating_mul(60));
            respond::vendor(slack.schedule_message(channel, text, post_at).await)
        }
        (&Method::GET, ["channels"]) => respond::vendor(slack.list_channels().await),
        (&Method::GET, ["channels", channel]) => respond::vendor(slack.channel_info(channel).await),
        (&Method::GET, ["channels", channel, "history"]) => respond::vendor(
            slack
                .channel_history(channel, req.query_param("limit"), req.query_param("cursor"))
                .await,
        ),
        (&Method::GET, ["channels", channel, "replies"]) => {
            let ts = req.require_query("ts")?;
            respond::vendor(slack.thread_replies(channel, ts).await)
        }
        (&Method::GET, ["channels", channel, "members"]) => {
            respond::vendor(slack.channel_members(channel).await)
        }
        (&Method::POST, ["channels", channel, "join"]) => {
            respond::vendor(slack.join_channel(channel).await)
        }
        (&Method::POST, ["channels", channel, "leave"]) => {
            respond::vendor(slack.leave_channel(channel).await)
        }
        (&Method::POST, ["dm"]) => {
            let object = req.object()?;
            let users = require_str(object, "users")?;
            respond::vendor(slack.open_dm(users).await)
        }
        (&Method::GET, ["users"]) => respond::vendor(slack.list_users().await),
        (&Method::GET, ["users", user]) => respond::vendor(slack.user_info(user).await),
        (&Method::GET, ["users", user, "profile"]) => {
            respond::vendor(slack.user_profile(user).await)
        }
        (&Method::POST, ["reactions"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            let name = require_str(object, "name")?;
            respond::vendor(slack.add_reaction(channel, ts, name).await)
        }
        (&Method::DELETE, ["reactions"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            let name = require_str(object, "name")?;
            respond::vendor(slack.remove_reaction(channel, ts, name).await)
        }
        (&Method::POST, ["pins"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            respond::vendor(slack.pin_message(channel, ts).await)
        }
        (&Method::DELETE, ["pins"]) => {
            let object = req.object()?;
            let channel = require_str(object, "channel")?;
            let ts = require_str(object, "ts")?;
            respond::vendor(slack.unpin_message(channel, ts).await)
        }
        (&Method::GET, ["pins", channel]) => respond::vendor(slack.list_pins(channel).await),
        _ => respond::not_found(),
    })
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
