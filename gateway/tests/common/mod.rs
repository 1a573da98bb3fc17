//! In-process stand-in for a vendor API. Binds an ephemeral port, records
//! every request it receives, and answers from a programmable queue (200
//! `{"ok": true}` once the queue is empty).

use http_body_util::{BodyExt, Full, combinators::BoxBody};
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: String,
    /// Parsed JSON body, or `Null` for empty and non-JSON bodies.
    pub body: Value,
}

#[derive(Clone)]
pub struct MockVendor {
    base_url: Url,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<(u16, Value)>>>,
}

impl MockVendor {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls: Arc<Mutex<Vec<RecordedCall>>> = Arc::default();
        let responses: Arc<Mutex<VecDeque<(u16, Value)>>> = Arc::default();
        let mock = Self {
            base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
            calls: calls.clone(),
            responses: responses.clone(),
        };

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let calls = calls.clone();
                let responses = responses.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let calls = calls.clone();
                        let responses = responses.clone();
                        async move { Ok::<_, Infallible>(answer(req, &calls, &responses).await) }
                    });
                    let _ = Builder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        mock
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Queue the next response. Responses are consumed in FIFO order.
    pub fn enqueue(&self, status: u16, body: Value) {
        self.responses.lock().unwrap().push_back((status, body));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn answer(
    req: Request<Incoming>,
    calls: &Mutex<Vec<RecordedCall>>,
    responses: &Mutex<VecDeque<(u16, Value)>>,
) -> Response<BoxBody<Bytes, Infallible>> {
    let (parts, body) = req.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    calls.lock().unwrap().push(RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().unwrap_or("").to_string(),
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    });

    let (status, payload) = responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((200, json!({"ok": true})));
    let status = StatusCode::from_u16(status).unwrap();
    let bytes = if status == StatusCode::NO_CONTENT {
        Bytes::new()
    } else {
        Bytes::from(serde_json::to_vec(&payload).unwrap())
    };
    let mut response = Response::new(Full::new(bytes).map_err(|never| match never {}).boxed());
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}

/// A URL nothing listens on, for exercising transport failures.
pub async fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}
