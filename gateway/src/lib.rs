pub mod api;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod request;
pub mod respond;
pub mod router;

use connectors::Connectors;
use errors::GatewayError;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::body::{Bytes, Incoming};
use hyper::header::AUTHORIZATION;
use hyper::service::Service;
use hyper::{Request, Response};
use router::Router;
use shared::admin_service::AdminService;
use shared::http::run_http_service;
use std::pin::Pin;
use std::sync::Arc;

/// Wire every vendor route module into one router. Vendors without a
/// credential are still registered; their routes answer 401.
pub fn build_router(connectors: Connectors) -> Router {
    let mut router = Router::new();
    router.register(Box::new(api::slack::SlackApi::new(connectors.slack)));
    router.register(Box::new(api::notion::NotionApi::new(connectors.notion)));
    router.register(Box::new(api::teams::TeamsApi::new(connectors.teams)));
    router.register(Box::new(api::asana::AsanaApi::new(connectors.asana)));
    router.register(Box::new(api::clickup::ClickUpApi::new(connectors.clickup)));
    router.register(Box::new(api::jira::JiraApi::new(connectors.jira)));
    router.register(Box::new(api::monday::MondayApi::new(connectors.monday)));
    router.register(Box::new(api::salesforce::SalesforceApi::new(
        connectors.salesforce,
    )));
    router.register(Box::new(api::linkedin::LinkedInApi::new(
        connectors.linkedin,
    )));
    router.register(Box::new(api::linkedin_sales::SalesNavApi::new(
        connectors.linkedin_sales,
    )));
    router.register(Box::new(api::discord::DiscordApi::new(connectors.discord)));
    router.register(Box::new(api::instagram::InstagramApi::new(
        connectors.instagram,
    )));
    router.register(Box::new(api::facebook::FacebookApi::new(
        connectors.facebook,
    )));
    router.register(Box::new(api::whatsapp::WhatsAppApi::new(
        connectors.whatsapp,
    )));
    router
}

pub struct GatewayService {
    router: Arc<Router>,
}

impl GatewayService {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<BoxBody<Bytes, GatewayError>>;
    type Error = GatewayError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let bearer = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_string);
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read request body");
                    return Ok(respond::bad_request("failed to read request body"));
                }
            };
            let query = parts.uri.query().unwrap_or("");
            Ok(router
                .route(parts.method, parts.uri.path(), query, bearer, &body)
                .await)
        })
    }
}

pub async fn run(config: config::Config, connectors: Connectors) -> Result<(), GatewayError> {
    let admin_service: AdminService<_, GatewayError> = AdminService::new(|| true);
    let admin_host = config.admin_listener.host.clone();
    let admin_port = config.admin_listener.port;
    tokio::spawn(async move {
        if let Err(err) = run_http_service(&admin_host, admin_port, admin_service).await {
            tracing::error!(error = %err, "admin listener failed");
        }
    });

    let service = GatewayService::new(build_router(connectors));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        "gateway listening"
    );
    run_http_service(&config.listener.host, config.listener.port, service).await
}
