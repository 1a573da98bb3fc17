//! WhatsApp Business Cloud API (`https://graph.facebook.com/v18.0/`). Bearer
//! auth; message sends all POST to `{phone_number_id}/messages` and every
//! payload carries `"messaging_product": "whatsapp"`.

use crate::client::{Auth, CallError, CallResult, VendorClient};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use url::Url;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0/";

#[derive(Debug, Clone)]
pub struct WhatsAppConnector {
    client: VendorClient,
    phone_number_id: String,
}

impl WhatsAppConnector {
    pub fn new(access_token: String, phone_number_id: String) -> Self {
        let base_url = Url::parse(GRAPH_API_BASE).expect("valid Graph API base URL");
        Self::with_base_url(access_token, phone_number_id, base_url)
    }

    pub fn with_base_url(access_token: String, phone_number_id: String, base_url: Url) -> Self {
        Self {
            client: VendorClient::new(base_url, Auth::Bearer(access_token)),
            phone_number_id,
        }
    }

    async fn send(&self, payload: Value) -> CallResult {
        self.client
            .post(format!("{}/messages", self.phone_number_id))
            .json(payload)
            .send()
            .await
    }

    pub async fn send_text(&self, to: &str, body: &str) -> CallResult {
        self.send(text_payload(to, body)).await
    }

    pub async fn send_image(&self, to: &str, image_url: &str, caption: &str) -> CallResult {
        self.send(media_payload(to, "image", image_url, caption))
            .await
    }

    pub async fn send_video(&self, to: &str, video_url: &str, caption: &str) -> CallResult {
        self.send(media_payload(to, "video", video_url, caption))
            .await
    }

    pub async fn send_document(&self, to: &str, document_url: &str, filename: &str) -> CallResult {
        self.send(json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "document",
            "document": {"link": document_url, "filename": filename},
        }))
        .await
    }

    pub async fn send_location(
        &self,
        to: &str,
        latitude: f64,
        longitude: f64,
        name: &str,
        address: &str,
    ) -> CallResult {
        self.send(json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "location",
            "location": {
                "latitude": latitude,
                "longitude": longitude,
                "name": name,
                "address": address,
            },
        }))
        .await
    }

    pub async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        language: &str,
        variables: &[Value],
    ) -> CallResult {
        self.send(template_payload(to, template_name, language, variables))
            .await
    }

    pub async fn mark_read(&self, message_id: &str) -> CallResult {
        self.send(json!({
            "messaging_product": "whatsapp",
            "status": "read",
            "message_id": message_id,
        }))
        .await
    }

    /// Upload raw media bytes; the vendor answers with a media id usable in
    /// later sends.
    pub async fn upload_media(
        &self,
        filename: &str,
        media_type: &str,
        data: Vec<u8>,
    ) -> CallResult {
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(media_type)
            .map_err(|e| CallError::Network(format!("invalid media type: {e}")))?;
        let form = Form::new()
            .text("messaging_product", "whatsapp")
            .part("file", part);
        self.client
            .post(format!("{}/media", self.phone_number_id))
            .multipart(form)
            .send()
            .await
    }

    pub async fn get_media(&self, media_id: &str) -> CallResult {
        self.client.get(media_id.to_string()).send().await
    }

    pub async fn delete_media(&self, media_id: &str) -> CallResult {
        self.client.delete(media_id.to_string()).send().await
    }

    pub async fn business_profile(&self) -> CallResult {
        self.client
            .get(format!("{}/whatsapp_business_profile", self.phone_number_id))
            .query(
                "fields",
                "about,address,description,email,profile_picture_url,websites,vertical",
            )
            .send()
            .await
    }

    pub async fn update_business_profile(&self, updates: &Value) -> CallResult {
        let mut payload = updates.clone();
        payload["messaging_product"] = json!("whatsapp");
        self.client
            .post(format!("{}/whatsapp_business_profile", self.phone_number_id))
            .json(payload)
            .send()
            .await
    }
}

fn text_payload(to: &str, body: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "text",
        "text": {"body": body},
    })
}

fn media_payload(to: &str, kind: &str, link: &str, caption: &str) -> Value {
    let mut media = json!({"link": link});
    if !caption.is_empty() {
        media["caption"] = json!(caption);
    }
    let mut payload = json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": kind,
    });
    payload[kind] = media;
    payload
}

fn template_payload(to: &str, name: &str, language: &str, variables: &[Value]) -> Value {
    let parameters: Vec<Value> = variables
        .iter()
        .map(|v| json!({"type": "text", "text": crate::client::value_to_string(v)}))
        .collect();
    let mut template = json!({
        "name": name,
        "language": {"code": language},
    });
    if !parameters.is_empty() {
        template["components"] = json!([{"type": "body", "parameters": parameters}]);
    }
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "template",
        "template": template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_shape() {
        let payload = text_payload("15550001111", "hello");
        assert_eq!(payload["messaging_product"], "whatsapp");
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["text"]["body"], "hello");
    }

    #[test]
    fn media_payload_omits_empty_caption() {
        let with = media_payload("1555", "image", "https://x/y.png", "look");
        assert_eq!(with["image"]["caption"], "look");
        let without = media_payload("1555", "video", "https://x/y.mp4", "");
        assert!(without["video"].get("caption").is_none());
        assert_eq!(without["type"], "video");
    }

    #[test]
    fn template_payload_maps_variables_to_body_parameters() {
        let payload = template_payload(
            "1555",
            "order_update",
            "en_US",
            &[json!("A-1"), json!(3)],
        );
        assert_eq!(payload["template"]["name"], "order_update");
        assert_eq!(payload["template"]["language"]["code"], "en_US");
        let params = &payload["template"]["components"][0]["parameters"];
        assert_eq!(params[0]["text"], "A-1");
        assert_eq!(params[1]["text"], "3");
    }

    #[test]
    fn template_payload_without_variables_has_no_components() {
        let payload = template_payload("1555", "hello_world", "en_US", &[]);
        assert!(payload["template"].get("components").is_none());
    }
}
