use crate::request::{ApiRequest, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use connectors::linkedin_sales::SalesNavConnector;
use hyper::Method;
use serde_json::Value;

pub struct SalesNavApi {
    connector: Option<SalesNavConnector>,
}

impl SalesNavApi {
    pub fn new(connector: Option<SalesNavConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for SalesNavApi {
    fn name(&self) -> &'static str {
        "linkedin-sales"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(nav) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(nav, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(nav: &SalesNavConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::GET, ["profile"]) => {
            let instance_id = req.require_query("instance_id")?;
            let partner = req.require_query("partner")?;
            let record_id = req.require_query("record_id")?;
            respond::vendor(nav.profile_association(instance_id, partner, record_id).await)
        }
        (&Method::GET, ["contacts", member_id]) => {
            respond::vendor(nav.contact_info(member_id).await)
        }
        (&Method::GET, ["companies", company_id]) => {
            respond::vendor(nav.company_profile(company_id).await)
        }
        (&Method::POST, ["leads", "search"]) => {
            let object = req.object()?;
            respond::vendor(nav.search_leads(&Value::Object(object.clone())).await)
        }
        (&Method::POST, ["accounts", "search"]) => {
            let object = req.object()?;
            respond::vendor(nav.search_accounts(&Value::Object(object.clone())).await)
        }
        (&Method::GET, ["lead-lists"]) => {
            let user_id = req.require_query("user_id")?;
            respond::vendor(nav.lead_lists(user_id).await)
        }
        (&Method::POST, ["lead-lists"]) => {
            let object = req.object()?;
            let name = require_str(object, "name")?;
            respond::vendor(nav.create_lead_list(name).await)
        }
        (&Method::GET, ["lead-lists", list_id, "leads"]) => {
            respond::vendor(nav.leads_in_list(list_id).await)
        }
        (&Method::POST, ["lead-lists", list_id, "leads"]) => {
            let object = req.object()?;
            let lead_id = require_str(object, "lead_id")?;
            respond::vendor(nav.add_lead_to_list(lead_id, list_id).await)
        }
        (&Method::DELETE, ["lead-lists", list_id, "leads", lead_id]) => {
            respond::vendor(nav.remove_lead_from_list(lead_id, list_id).await)
        }
        _ => respond::not_found(),
    })
}
