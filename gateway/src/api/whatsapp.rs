use crate::request::{ApiRequest, optional_str, require_str};
use crate::respond::{self, Reply, RouteResult};
use crate::router::VendorApi;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use connectors::whatsapp::WhatsAppConnector;
use hyper::Method;
use serde_json::Value;

pub struct WhatsAppApi {
    connector: Option<WhatsAppConnector>,
}

impl WhatsAppApi {
    pub fn new(connector: Option<WhatsAppConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl VendorApi for WhatsAppApi {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn dispatch(&self, req: ApiRequest) -> Reply {
        let Some(whatsapp) = &self.connector else {
            return respond::vendor_disabled();
        };
        handle(whatsapp, req).await.unwrap_or_else(|reply| reply)
    }
}

async fn handle(wa: &WhatsAppConnector, req: ApiRequest) -> RouteResult {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();
    Ok(match (&req.method, segments.as_slice()) {
        (&Method::POST, ["messages", "text"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let body = require_str(object, "body")?;
            respond::vendor(wa.send_text(to, body).await)
        }
        (&Method::POST, ["messages", "image"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let image_url = require_str(object, "image_url")?;
            let caption = optional_str(object, "caption").unwrap_or("");
            respond::vendor(wa.send_image(to, image_url, caption).await)
        }
        (&Method::POST, ["messages", "video"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let video_url = require_str(object, "video_url")?;
            let caption = optional_str(object, "caption").unwrap_or("");
            respond::vendor(wa.send_video(to, video_url, caption).await)
        }
        (&Method::POST, ["messages", "document"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let document_url = require_str(object, "document_url")?;
            let filename = require_str(object, "filename")?;
            respond::vendor(wa.send_document(to, document_url, filename).await)
        }
        (&Method::POST, ["messages", "location"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let latitude = require_f64(object, "latitude")?;
            let longitude = require_f64(object, "longitude")?;
            let name = optional_str(object, "name").unwrap_or("");
            let address = optional_str(object, "address").unwrap_or("");
            respond::vendor(wa.send_location(to, latitude, longitude, name, address).await)
        }
        (&Method::POST, ["messages", "template"]) => {
            let object = req.object()?;
            let to = require_str(object, "to")?;
            let template_name = require_str(object, "template_name")?;
            let language = optional_str(object, "language").unwrap_or("en_US");
            let variables: Vec<Value> = object
                .get("variables")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            respond::vendor(wa.send_template(to, template_name, language, &variables).await)
        }
        (&Method::POST, ["messages", message_id, "read"]) => {
            respond::vendor(wa.mark_read(message_id).await)
        }
        (&Method::POST, ["media"]) => {
            let object = req.object()?;
            let filename = require_str(object, "filename")?;
            let media_type = require_str(object, "media_type")?;
            let encoded = require_str(object, "data")?;
            let data = STANDARD
                .decode(encoded)
                .map_err(|_| respond::bad_request("data is not valid base64"))?;
            respond::vendor(wa.upload_media(filename, media_type, data).await)
        }
        (&Method::GET, ["media", media_id]) => respond::vendor(wa.get_media(media_id).await),
        (&Method::DELETE, ["media", media_id]) => respond::vendor(wa.delete_media(media_id).await),
        (&Method::GET, ["business-profile"]) => respond::vendor(wa.business_profile().await),
        (&Method::POST, ["business-profile"]) => {
            let object = req.object()?;
            respond::vendor(
                wa.update_business_profile(&Value::Object(object.clone()))
                    .await,
            )
        }
        _ => respond::not_found(),
    })
}

fn require_f64(object: &serde_json::Map<String, Value>, key: &str) -> Result<f64, Reply> {
    object
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| respond::bad_request(&format!("missing required field: {key}")))
}
