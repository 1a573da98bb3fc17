//! LinkedIn Sales Navigator API. These endpoints are restricted to approved
//! LinkedIn partners, so the connector carries a simulation switch: when it
//! is on and the vendor rejects a call with 400, 403, or 404, a clearly
//! labeled mock payload is returned instead. Every mock body carries a
//! `note` field so callers can tell it apart from live data.

use crate::client::{Auth, CallResult, VendorClient, VendorResponse};
use serde_json::Value;
use url::Url;

const SALES_NAV_API_BASE: &str = "https://api.linkedin.com/v2/";
const RESTLI_HEADER: (&str, &str) = ("X-RestLi-Protocol-Version", "2.0.0");

#[derive(Debug, Clone)]
pub struct SalesNavConnector {
    client: VendorClient,
    simulation: bool,
}

impl SalesNavConnector {
    pub fn new(access_token: String, simulation: bool) -> Self {
        let base_url = Url::parse(SALES_NAV_API_BASE).expect("valid Sales Navigator base URL");
        Self::with_base_url(access_token, simulation, base_url)
    }

    pub fn with_base_url(access_token: String, simulation: bool, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Bearer(access_token))
                .with_header(RESTLI_HEADER.0, RESTLI_HEADER.1),
            simulation,
        }
    }

    /// Mock fallback applies only to the rejection statuses partner-gated
    /// endpoints produce; other vendor errors pass through untouched.
    fn or_mock(&self, response: VendorResponse, mock: Value) -> VendorResponse {
        if self.simulation && matches!(response.status, 400 | 403 | 404) {
            return VendorResponse {
                status: 200,
                body: mock,
            };
        }
        response
    }

    pub async fn profile_association(
        &self,
        instance_id: &str,
        partner: &str,
        record_id: &str,
    ) -> CallResult {
        let path = format!(
            "salesNavigatorProfileAssociations/(instanceId:{instance_id},partner:{partner},recordId:{record_id})"
        );
        let response = self.client.get(path).send().await?;
        Ok(self.or_mock(response, mock::profile_association(record_id)))
    }

    // Contact and company lookups have no mock shape; rejections flow back
    // to the caller as vendor data.
    pub async fn contact_info(&self, member_id: &str) -> CallResult {
        self.client
            .get(format!("salesNavigatorContacts/{member_id}"))
            .send()
            .await
    }

    pub async fn company_profile(&self, company_id: &str) -> CallResult {
        self.client
            .get(format!("salesNavigatorCompanies/{company_id}"))
            .send()
            .await
    }

    pub async fn search_leads(&self, search_params: &Value) -> CallResult {
        self.client
            .post("salesNavigatorLeadSearch")
            .json(search_params.clone())
            .send()
            .await
    }

    pub async fn search_accounts(&self, search_params: &Value) -> CallResult {
        self.client
            .post("salesNavigatorAccountSearch")
            .json(search_params.clone())
            .send()
            .await
    }

    pub async fn lead_lists(&self, user_id: &str) -> CallResult {
        let response = self
            .client
            .get("salesNavigatorLeadLists")
            .query("q", "user")
            .query("userId", user_id)
            .send()
            .await?;
        Ok(self.or_mock(response, mock::lead_lists(user_id)))
    }

    pub async fn create_lead_list(&self, name: &str) -> CallResult {
        let response = self
            .client
            .post("salesNavigatorLeadLists")
            .json(serde_json::json!({"name": name}))
            .send()
            .await?;
        Ok(self.or_mock(response, mock::lead_list_created(name)))
    }

    pub async fn add_lead_to_list(&self, lead_id: &str, list_id: &str) -> CallResult {
        let response = self
            .client
            .post(format!("salesNavigatorLeadLists/{list_id}/leads"))
            .json(serde_json::json!({"lead": lead_id}))
            .send()
            .await?;
        Ok(self.or_mock(response, mock::lead_list_change(lead_id, list_id)))
    }

    pub async fn remove_lead_from_list(&self, lead_id: &str, list_id: &str) -> CallResult {
        let response = self
            .client
            .delete(format!("salesNavigatorLeadLists/{list_id}/leads/{lead_id}"))
            .send()
            .await?;
        Ok(self.or_mock(response, mock::lead_list_change(lead_id, list_id)))
    }

    pub async fn leads_in_list(&self, list_id: &str) -> CallResult {
        let response = self
            .client
            .get(format!("salesNavigatorLeadLists/{list_id}/leads"))
            .send()
            .await?;
        Ok(self.or_mock(response, mock::leads_in_list(list_id)))
    }
}

/// Labeled stand-in payloads used when simulation mode is on.
mod mock {
    use serde_json::{Value, json};

    const NOTE: &str =
        "Mock response - the live API requires LinkedIn Sales Navigator partner access.";

    pub fn profile_association(record_id: &str) -> Value {
        json!({
            "member": format!("urn:li:person:mock_{record_id}"),
            "profile": format!("https://www.linkedin.com/sales/profile/mock_{record_id}"),
            "profilePhoto": "https://media.licdn.com/dms/image/mock_profile_photo.jpg",
            "note": NOTE,
        })
    }

    pub fn lead_lists(user_id: &str) -> Value {
        json!({
            "user_id": user_id,
            "lead_lists": [
                {"id": "list_001", "name": "Top CTO Prospects", "created_at": "2024-01-01"},
                {"id": "list_002", "name": "Enterprise Leads", "created_at": "2023-12-15"},
            ],
            "note": NOTE,
        })
    }

    pub fn lead_list_created(name: &str) -> Value {
        json!({
            "id": "list_mock_001",
            "name": name,
            "status": "created",
            "note": NOTE,
        })
    }

    pub fn lead_list_change(lead_id: &str, list_id: &str) -> Value {
        json!({
            "lead_id": lead_id,
            "list_id": list_id,
            "status": "success",
            "note": NOTE,
        })
    }

    pub fn leads_in_list(list_id: &str) -> Value {
        json!({
            "list_id": list_id,
            "leads": [
                {
                    "id": "urn:li:lead:mock001",
                    "name": "Alice Johnson",
                    "title": "CTO",
                    "company": "MockTech Inc",
                },
                {
                    "id": "urn:li:lead:mock002",
                    "name": "Bob Lee",
                    "title": "VP of Engineering",
                    "company": "ExampleSoft",
                },
            ],
            "note": NOTE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simulation_replaces_gated_rejections() {
        let nav = SalesNavConnector::new("tok".into(), true);
        let rejected = VendorResponse {
            status: 403,
            body: json!({"message": "not a partner"}),
        };
        let out = nav.or_mock(rejected, mock::profile_association("r1"));
        assert_eq!(out.status, 200);
        assert_eq!(out.body["member"], "urn:li:person:mock_r1");
        assert!(out.body["note"].as_str().unwrap().starts_with("Mock"));
    }

    #[test]
    fn simulation_leaves_other_statuses_alone() {
        let nav = SalesNavConnector::new("tok".into(), true);
        let rate_limited = VendorResponse {
            status: 429,
            body: json!({"message": "slow down"}),
        };
        let out = nav.or_mock(rate_limited, mock::lead_lists("u1"));
        assert_eq!(out.status, 429);
        assert!(out.body.get("note").is_none());
    }

    #[test]
    fn simulation_off_passes_rejections_through() {
        let nav = SalesNavConnector::new("tok".into(), false);
        let rejected = VendorResponse {
            status: 403,
            body: json!({"message": "not a partner"}),
        };
        let out = nav.or_mock(rejected, mock::leads_in_list("l1"));
        assert_eq!(out.status, 403);
        assert_eq!(out.body["message"], "not a partner");
    }
}
