//! Reply construction. Vendor outcomes are mirrored back to the caller with
//! the vendor's own status code; only transport failures and gateway-side
//! validation produce statuses of our own.

use crate::errors::GatewayError;
use connectors::client::{CallError, CallResult};
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::{Value, json};

pub type Reply = Response<BoxBody<Bytes, GatewayError>>;

/// Route handlers return the success reply or a ready-to-send error reply.
pub type RouteResult = Result<Reply, Reply>;

pub fn json(status: StatusCode, value: &Value) -> Reply {
    shared::http::json_response(status, value)
}

pub fn error(status: StatusCode, message: &str) -> Reply {
    shared::http::error_response(status, message)
}

pub fn bad_request(message: &str) -> Reply {
    error(StatusCode::BAD_REQUEST, message)
}

pub fn not_found() -> Reply {
    error(StatusCode::NOT_FOUND, "no route matched")
}

pub fn vendor_disabled() -> Reply {
    error(StatusCode::UNAUTHORIZED, "vendor not configured")
}

/// Map a connector outcome onto the inbound response. A vendor response of
/// any status is mirrored; transport failures become a 500 with a
/// `network_error` marker so callers can tell them from vendor rejections.
pub fn vendor(result: CallResult) -> Reply {
    match result {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            json(status, &response.body)
        }
        Err(CallError::Network(message)) => json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({"error": "network_error", "message": message}),
        ),
        Err(CallError::Url(message)) => json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({"error": "internal_error", "message": message}),
        ),
        Err(CallError::MissingCredential(name)) => json(
            StatusCode::UNAUTHORIZED,
            &json!({"error": "missing_credential", "credential": name}),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::client::VendorResponse;
    use http_body_util::BodyExt;

    async fn body_json(reply: Reply) -> Value {
        let bytes = reply.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn vendor_status_is_mirrored() {
        let reply = vendor(Ok(VendorResponse {
            status: 403,
            body: json!({"error": "restricted_action"}),
        }));
        assert_eq!(reply.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(reply).await["error"], "restricted_action");
    }

    #[tokio::test]
    async fn network_failures_are_500_with_marker() {
        let reply = vendor(Err(CallError::Network("connection refused".into())));
        assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(reply).await;
        assert_eq!(body["error"], "network_error");
        assert_eq!(body["message"], "connection refused");
    }

    #[tokio::test]
    async fn missing_credential_is_401() {
        let reply = vendor(Err(CallError::MissingCredential("DISCORD_BOT_TOKEN")));
        assert_eq!(reply.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(reply).await["credential"], "DISCORD_BOT_TOKEN");
    }
}
