use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::salesforce::SalesforceConnector;
use hyper::Method;
use serde_json::Value;

pub struct SalesforceApi {
    connector: Option<SalesforceConnector>,
}

impl SalesforceApi {
    pub fn new(connector: Option<SalesforceConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for SalesforceApi {
    fn name(&self) -> &'static str {
        "salesforce"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(salesforce) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(salesforce, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(sf: &SalesforceConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["userinfo"]) => respond::vendor(sf.user_info().await),
        (&Method::GET, ["limits"]) => respond::vendor(sf.limits().await),
        (&Method::GET, ["objects"]) => respond::vendor(sf.list_objects().await),
        (&Method::GET, ["objects", name, "describe"]) => {
            respond::vendor(sf.describe_object(name).await)
        }
        (&Method::GET, ["query"]) => {
            let soql = req.require_query("q")?;
            respond::vendor(sf.query(soql).await)
        }
        (&Method::GET, ["search"]) => {
            let sosl = req.require_query("q")?;
            respond::vendor(sf.search(sosl).await)
        }
        (&Method::GET, ["recent"]) => respond::vendor(sf.recent_items().await),
        (&Method::POST, ["records", object_name]) => {
            let object = req.object()?;
            respond::vendor(
                sf.create_record(object_name, &Value::Object(object.clone()))
                    .await,
            )
        }
        (&Method::GET, ["records", object_name, record_id]) => {
            respond::vendor(sf.retrieve_record(object_name, record_id).await)
        }
        (&Method::PATCH, ["records", object_name, record_id]) => {
            let object = req.object()?;
            respond::vendor(
                sf.update_record(object_name, record_id, &Value::Object(object.clone()))
                    .await,
            )
        }
        (&Method::DELETE, ["records", object_name, record_id]) => {
            respond::vendor(sf.delete_record(object_name, record_id).await)
        }
        (&Method::PATCH, ["records", object_name, "upsert", external_field]) => {
            let object = req.object()?;
            let external_id = require_str(object, "external_id")?;
            let fields = object.get("fields").ok_or_else(|| {
                respond::bad_request("missing required field: fields")
            })?;
            respond::vendor(
                sf.upsert_record(object_name, external_field, external_id, fields)
                    .await,
            )
        }
        _ => respond::not_found(),
    })
}
