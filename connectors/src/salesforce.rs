//! Salesforce REST API (`{instance}/services/data/v60.0/`). Bearer auth with
//! the configured security token. User info lives on the login host rather
//! than the instance, so the connector keeps a second URL for it.

use crate::client::{Auth, CallError, CallResult, VendorClient};
use serde_json::Value;
use url::Url;

const API_VERSION: &str = "v60.0";
const USERINFO_URL: &str = "https://login.salesforce.com/services/oauth2/userinfo";

#[derive(Debug, Clone)]
pub struct SalesforceConnector {
    client: VendorClient,
    userinfo: VendorClient,
}

impl SalesforceConnector {
    pub fn new(access_token: String, instance_url: &str) -> Result<Self, CallError> {
        let userinfo_url = Url::parse(USERINFO_URL).expect("valid Salesforce userinfo URL");
        Self::with_base_urls(access_token, instance_url, userinfo_url)
    }

    pub fn with_base_urls(
        access_token: String,
        instance_url: &str,
        userinfo_url: Url,
    ) -> Result<Self, CallError> {
        let base = format!(
            "{}/services/data/{API_VERSION}/",
            instance_url.trim_end_matches('/')
        );
        let base_url = Url::parse(&base).map_err(|e| CallError::Url(format!("{base}: {e}")))?;
        Ok(Self {
            client: VendorClient::new(base_url, Auth::Bearer(access_token.clone())),
            userinfo: VendorClient::new(userinfo_url, Auth::Bearer(access_token)),
        })
    }

    pub async fn user_info(&self) -> CallResult {
        self.userinfo.get("").send().await
    }

    pub async fn limits(&self) -> CallResult {
        self.client.get("limits").send().await
    }

    pub async fn list_objects(&self) -> CallResult {
        self.client.get("sobjects").send().await
    }

    pub async fn describe_object(&self, object_name: &str) -> CallResult {
        self.client
            .get(format!("sobjects/{object_name}/describe"))
            .send()
            .await
    }

    /// SOQL query; the query string is passed through URL-encoded.
    pub async fn query(&self, soql: &str) -> CallResult {
        self.client.get("query").query("q", soql).send().await
    }

    /// SOSL search.
    pub async fn search(&self, sosl: &str) -> CallResult {
        self.client.get("search").query("q", sosl).send().await
    }

    pub async fn create_record(&self, object_name: &str, fields: &Value) -> CallResult {
        self.client
            .post(format!("sobjects/{object_name}"))
            .json(fields.clone())
            .send()
            .await
    }

    pub async fn retrieve_record(&self, object_name: &str, record_id: &str) -> CallResult {
        self.client
            .get(format!("sobjects/{object_name}/{record_id}"))
            .send()
            .await
    }

    pub async fn update_record(
        &self,
        object_name: &str,
        record_id: &str,
        fields: &Value,
    ) -> CallResult {
        self.client
            .patch(format!("sobjects/{object_name}/{record_id}"))
            .json(fields.clone())
            .send()
            .await
    }

    pub async fn delete_record(&self, object_name: &str, record_id: &str) -> CallResult {
        self.client
            .delete(format!("sobjects/{object_name}/{record_id}"))
            .send()
            .await
    }

    /// Upsert by external id: create or update depending on whether the
    /// external id value already exists vendor-side.
    pub async fn upsert_record(
        &self,
        object_name: &str,
        external_id_field: &str,
        external_id: &str,
        fields: &Value,
    ) -> CallResult {
        self.client
            .patch(format!(
                "sobjects/{object_name}/{external_id_field}/{external_id}"
            ))
            .json(fields.clone())
            .send()
            .await
    }

    pub async fn recent_items(&self) -> CallResult {
        self.client.get("recent").send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_url_builds_versioned_base() {
        let sf = SalesforceConnector::new("tok".into(), "https://acme.my.salesforce.com/").unwrap();
        assert_eq!(
            sf.client.base_url().as_str(),
            "https://acme.my.salesforce.com/services/data/v60.0/"
        );
    }
}
