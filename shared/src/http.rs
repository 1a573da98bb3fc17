use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept loop shared by the gateway and admin listeners. Each connection is
/// handed to hyper with h1/h2 auto-detection on the socket.
pub async fn run_http_service<S, E>(host: &str, port: u16, service: S) -> Result<(), E>
where
    S: Service<Request<Incoming>, Response = Response<BoxBody<Bytes, E>>, Error = E>
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
    E: From<std::io::Error> + std::error::Error + Send + Sync + 'static,
{
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    let service_arc = Arc::new(service);

    loop {
        let (stream, _peer_addr) = listener.accept().await?;
        let _ = stream.set_nodelay(true);
        let io = TokioIo::new(stream);
        let svc = service_arc.clone();

        tokio::spawn(async move {
            let _ = Builder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await;
        });
    }
}

/// Wrap raw bytes into the boxed body type used by every service in the
/// workspace. The error type is phantom; `Full` never fails.
pub fn full_body<E>(bytes: Bytes) -> BoxBody<Bytes, E> {
    Full::new(bytes).map_err(|never| match never {}).boxed()
}

/// Serialize a JSON value into a response with the given status code.
pub fn json_response<E>(status: StatusCode, value: &Value) -> Response<BoxBody<Bytes, E>> {
    let bytes = serde_json::to_vec(value)
        .map(Bytes::from)
        .unwrap_or_else(|_| Bytes::from_static(b"{}"));
    let mut response = Response::new(full_body(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}

/// Uniform `{"error": ...}` body for failures produced by this service
/// rather than passed through from a vendor.
pub fn error_response<E>(status: StatusCode, message: &str) -> Response<BoxBody<Bytes, E>> {
    json_response(status, &json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::convert::Infallible;

    #[tokio::test]
    async fn json_response_sets_status_and_content_type() {
        let res: Response<BoxBody<Bytes, Infallible>> =
            json_response(StatusCode::CREATED, &json!({"id": 7}));
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(
            res.headers().get(hyper::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"id": 7}));
    }

    #[tokio::test]
    async fn error_response_wraps_message() {
        let res: Response<BoxBody<Bytes, Infallible>> =
            error_response(StatusCode::BAD_REQUEST, "missing field: channel");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"], "missing field: channel");
    }
}
