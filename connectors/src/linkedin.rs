//! LinkedIn member API (`https://api.linkedin.com/v2/`). No service
//! credential: every call forwards the inbound caller's own bearer token.
//! Post operations chain a `userinfo` lookup first to resolve the member
//! URN the API requires.

use crate::client::{Auth, CallResult, VendorClient, VendorResponse};
use serde_json::json;
use url::Url;

const LINKEDIN_API_BASE: &str = "https://api.linkedin.com/v2/";
const RESTLI_HEADER: (&str, &str) = ("X-Restli-Protocol-Version", "2.0.0");

#[derive(Debug, Clone)]
pub struct LinkedInConnector {
    client: VendorClient,
}

enum Urn {
    Resolved(String),
    Failed(VendorResponse),
}

impl Default for LinkedInConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedInConnector {
    pub fn new() -> Self {
        let base_url = Url::parse(LINKEDIN_API_BASE).expect("valid LinkedIn base URL");
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::None)
                .with_header(RESTLI_HEADER.0, RESTLI_HEADER.1),
        }
    }

    pub async fn profile(&self, token: &str) -> CallResult {
        self.client.get("userinfo").bearer(token).send().await
    }

    /// The email is a field of the same userinfo payload.
    pub async fn email(&self, token: &str) -> CallResult {
        let response = self.profile(token).await?;
        if !response.is_success() {
            return Ok(response);
        }
        Ok(VendorResponse {
            status: response.status,
            body: json!({"email": response.body["email"]}),
        })
    }

    pub async fn urn(&self, token: &str) -> CallResult {
        let response = self.profile(token).await?;
        if !response.is_success() {
            return Ok(response);
        }
        Ok(VendorResponse {
            status: response.status,
            body: json!({"urn": member_urn(&response.body)}),
        })
    }

    async fn resolve_urn(&self, token: &str) -> Result<Urn, crate::client::CallError> {
        let response = self.profile(token).await?;
        if !response.is_success() {
            return Ok(Urn::Failed(response));
        }
        match member_urn(&response.body) {
            Some(urn) => Ok(Urn::Resolved(urn)),
            None => Ok(Urn::Failed(VendorResponse {
                status: 502,
                body: json!({"error": "userinfo response missing sub"}),
            })),
        }
    }

    /// Member's own posts: userinfo → ugcPosts, two sequential calls.
    pub async fn posts(&self, token: &str) -> CallResult {
        let urn = match self.resolve_urn(token).await? {
            Urn::Resolved(urn) => urn,
            Urn::Failed(response) => return Ok(response),
        };
        self.client
            .get("ugcPosts")
            .query("q", "authors")
            .query("authors", format!("List({urn})"))
            .bearer(token)
            .send()
            .await
    }

    /// Publish a plain text share: userinfo → ugcPosts create.
    pub async fn create_post(&self, token: &str, text: &str) -> CallResult {
        let urn = match self.resolve_urn(token).await? {
            Urn::Resolved(urn) => urn,
            Urn::Failed(response) => return Ok(response),
        };
        let payload = json!({
            "author": urn,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": {"text": text},
                    "shareMediaCategory": "NONE",
                }
            },
            "visibility": {"com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"},
        });
        self.client
            .post("ugcPosts")
            .bearer(token)
            .json(payload)
            .send()
            .await
    }

    pub async fn get_post(&self, token: &str, post_urn: &str) -> CallResult {
        self.client
            .get(format!("ugcPosts/{}", encode_urn(post_urn)))
            .bearer(token)
            .send()
            .await
    }

    pub async fn delete_post(&self, token: &str, post_urn: &str) -> CallResult {
        self.client
            .delete(format!("ugcPosts/{}", encode_urn(post_urn)))
            .bearer(token)
            .send()
            .await
    }

    pub async fn like_post(&self, token: &str, post_urn: &str) -> CallResult {
        let urn = match self.resolve_urn(token).await? {
            Urn::Resolved(urn) => urn,
            Urn::Failed(response) => return Ok(response),
        };
        let payload = json!({"actor": urn, "object": post_urn});
        self.client
            .post(format!("socialActions/{}/likes", encode_urn(post_urn)))
            .bearer(token)
            .json(payload)
            .send()
            .await
    }

    pub async fn comment_on_post(&self, token: &str, post_urn: &str, text: &str) -> CallResult {
        let urn = match self.resolve_urn(token).await? {
            Urn::Resolved(urn) => urn,
            Urn::Failed(response) => return Ok(response),
        };
        let payload = json!({"actor": urn, "message": {"text": text}});
        self.client
            .post(format!("socialActions/{}/comments", encode_urn(post_urn)))
            .bearer(token)
            .json(payload)
            .send()
            .await
    }
}

fn member_urn(userinfo: &serde_json::Value) -> Option<String> {
    userinfo["sub"].as_str().map(|sub| format!("urn:li:person:{sub}"))
}

/// URNs contain colons, which must be percent-encoded in a path segment.
fn encode_urn(urn: &str) -> String {
    urn.replace(':', "%3A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_urn_from_sub() {
        let userinfo = json!({"sub": "abc123", "email": "a@b.c"});
        assert_eq!(
            member_urn(&userinfo).unwrap(),
            "urn:li:person:abc123"
        );
        assert!(member_urn(&json!({})).is_none());
    }

    #[test]
    fn urn_encoding() {
        assert_eq!(
            encode_urn("urn:li:ugcPost:99"),
            "urn%3Ali%3AugcPost%3A99"
        );
    }
}
