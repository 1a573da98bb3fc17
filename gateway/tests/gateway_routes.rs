mod common;

use common::{MockVendor, refused_url};
use connectors::asana::AsanaConnector;
use connectors::discord::DiscordConnector;
use connectors::linkedin_sales::SalesNavConnector;
use connectors::slack::SlackConnector;
use gateway::api;
use gateway::respond::Reply;
use gateway::router::Router;
use http_body_util::BodyExt;
use hyper::{Method, StatusCode};
use serde_json::{Value, json};
use url::Url;

async fn body_json(reply: Reply) -> Value {
    let bytes = reply.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn slack_router(base_url: Url) -> Router {
    let mut router = Router::new();
    router.register(Box::new(api::slack::SlackApi::new(Some(
        SlackConnector::with_base_url("xoxb-test".into(), base_url),
    ))));
    router
}

fn asana_router(base_url: Url) -> Router {
    let mut router = Router::new();
    router.register(Box::new(api::asana::AsanaApi::new(Some(
        AsanaConnector::with_base_url("pat-test".into(), base_url),
    ))));
    router
}

#[tokio::test]
async fn slack_message_passes_payload_through() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    mock.enqueue(200, json!({"ok": true, "ts": "1727000000.000100"}));
    let reply = router
        .route(
            Method::POST,
            "/api/slack/message",
            "",
            None,
            br#"{"channel": "C123", "text": "hi"}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    let body = body_json(reply).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["ts"], "1727000000.000100");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "/chat.postMessage");
    assert_eq!(calls[0].body["channel"], "C123");
    assert_eq!(calls[0].body["text"], "hi");
}

#[tokio::test]
async fn slack_send_message_path_reaches_same_operation() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    mock.enqueue(200, json!({"ok": true}));
    let reply = router
        .route(
            Method::POST,
            "/api/slack/send-message",
            "",
            None,
            br#"{"channel": "C123", "text": "hi"}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(body_json(reply).await["ok"], true);
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/chat.postMessage");
}

#[tokio::test]
async fn schedule_with_huge_delay_saturates_instead_of_panicking() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    mock.enqueue(200, json!({"ok": true}));
    let body = format!(
        r#"{{"channel": "C123", "text": "later", "minutes_from_now": {}}}"#,
        i64::MAX
    );
    let reply = router
        .route(
            Method::POST,
            "/api/slack/message/schedule",
            "",
            None,
            body.as_bytes(),
        )
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    let calls = mock.calls();
    assert_eq!(calls[0].body["post_at"], json!(i64::MAX));
}

#[tokio::test]
async fn missing_field_rejects_before_any_outbound_call() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    let reply = router
        .route(
            Method::POST,
            "/api/slack/message",
            "",
            None,
            br#"{"channel": "C123"}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(reply).await["error"],
        "missing required field: text"
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn vendor_rejection_is_mirrored_as_data() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    mock.enqueue(403, json!({"ok": false, "error": "restricted_action"}));
    let reply = router
        .route(
            Method::POST,
            "/api/slack/message",
            "",
            None,
            br#"{"channel": "C123", "text": "hi"}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::FORBIDDEN);
    let body = body_json(reply).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "restricted_action");
}

#[tokio::test]
async fn empty_success_body_is_normalized() {
    let mock = MockVendor::start().await;
    let mut router = Router::new();
    router.register(Box::new(api::discord::DiscordApi::new(
        DiscordConnector::with_base_url(Some("bot-token".into()), mock.base_url()),
    )));

    mock.enqueue(204, Value::Null);
    let reply = router
        .route(
            Method::DELETE,
            "/api/discord/channels/C1/messages/M1",
            "",
            None,
            b"",
        )
        .await;

    assert_eq!(reply.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_json(reply).await, json!({"status": "success"}));
}

#[tokio::test]
async fn transport_failure_is_500_network_error() {
    let router = slack_router(refused_url().await);

    let reply = router
        .route(Method::GET, "/api/slack/channels", "", None, b"")
        .await;

    assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(reply).await["error"], "network_error");
}

#[tokio::test]
async fn unknown_vendor_is_404() {
    let mock = MockVendor::start().await;
    let router = slack_router(mock.base_url());

    let reply = router
        .route(Method::GET, "/api/hipchat/rooms", "", None, b"")
        .await;

    assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn unconfigured_vendor_is_401() {
    let mut router = Router::new();
    router.register(Box::new(api::slack::SlackApi::new(None)));

    let reply = router
        .route(Method::GET, "/api/slack/channels", "", None, b"")
        .await;

    assert_eq!(reply.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(reply).await["error"], "vendor not configured");
}

#[tokio::test]
async fn duplicate_project_copies_tasks_in_order() {
    let mock = MockVendor::start().await;
    let router = asana_router(mock.base_url());

    mock.enqueue(
        200,
        json!({"data": {"name": "Roadmap", "workspace": {"gid": "w1"}}}),
    );
    mock.enqueue(200, json!({"data": {"gid": "np1"}}));
    mock.enqueue(200, json!({"data": [{"gid": "t1"}, {"gid": "t2"}]}));
    mock.enqueue(200, json!({"data": {"name": "Design", "notes": "draft"}}));
    mock.enqueue(200, json!({"data": {"gid": "nt1"}}));
    mock.enqueue(200, json!({"data": {"name": "Build", "notes": ""}}));
    mock.enqueue(200, json!({"data": {"gid": "nt2"}}));

    let reply = router
        .route(Method::POST, "/api/asana/projects/p1/duplicate", "", None, b"")
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    let body = body_json(reply).await;
    assert_eq!(body["message"], "Project duplicated");
    assert_eq!(body["original_project"], "Roadmap");
    assert_eq!(body["new_project_gid"], "np1");

    let calls = mock.calls();
    let paths: Vec<&str> = calls.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "/projects/p1",
            "/projects",
            "/projects/p1/tasks",
            "/tasks/t1",
            "/tasks",
            "/tasks/t2",
            "/tasks",
        ]
    );
    assert_eq!(calls[1].body["data"]["name"], "Copy of Roadmap");
    assert_eq!(calls[4].body["data"]["name"], "Design");
    assert_eq!(calls[4].body["data"]["projects"], json!(["np1"]));
}

#[tokio::test]
async fn duplicate_project_passes_vendor_rejection_through() {
    let mock = MockVendor::start().await;
    let router = asana_router(mock.base_url());

    mock.enqueue(404, json!({"errors": [{"message": "project not found"}]}));
    let reply = router
        .route(Method::POST, "/api/asana/projects/nope/duplicate", "", None, b"")
        .await;

    assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn favorites_live_in_process_and_allow_duplicates() {
    let mock = MockVendor::start().await;
    let router = asana_router(mock.base_url());
    let add = br#"{"user_gid": "u1", "project_gid": "p1", "project_name": "Roadmap"}"#;

    let reply = router
        .route(Method::POST, "/api/asana/favorites", "", None, add)
        .await;
    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(body_json(reply).await["message"], "Project favorited");

    // Adding the same project again appends a second entry.
    router
        .route(Method::POST, "/api/asana/favorites", "", None, add)
        .await;
    let reply = router
        .route(Method::GET, "/api/asana/favorites/u1", "", None, b"")
        .await;
    let listed = body_json(reply).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["project_name"], "Roadmap");

    let reply = router
        .route(Method::DELETE, "/api/asana/favorites/u1/p1", "", None, b"")
        .await;
    assert_eq!(body_json(reply).await["message"], "Project unfavorited");

    let reply = router
        .route(Method::GET, "/api/asana/favorites/u1", "", None, b"")
        .await;
    assert_eq!(body_json(reply).await, json!([]));

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn task_without_container_is_rejected() {
    let mock = MockVendor::start().await;
    let router = asana_router(mock.base_url());

    let reply = router
        .route(
            Method::POST,
            "/api/asana/task",
            "",
            None,
            br#"{"name": "Ship it", "projects": []}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(reply).await["error"],
        "task requires a workspace or at least one project"
    );
    assert!(mock.calls().is_empty());
}

fn sales_nav_router(base_url: Url, simulation: bool) -> Router {
    let mut router = Router::new();
    router.register(Box::new(api::linkedin_sales::SalesNavApi::new(Some(
        SalesNavConnector::with_base_url("tok".into(), simulation, base_url),
    ))));
    router
}

#[tokio::test]
async fn simulation_mode_answers_gated_rejections_with_mocks() {
    let mock = MockVendor::start().await;
    let router = sales_nav_router(mock.base_url(), true);

    mock.enqueue(403, json!({"message": "not a partner"}));
    let reply = router
        .route(
            Method::GET,
            "/api/linkedin-sales/profile",
            "instance_id=i1&partner=crm&record_id=r1",
            None,
            b"",
        )
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    let body = body_json(reply).await;
    assert_eq!(body["member"], "urn:li:person:mock_r1");
    assert!(body["note"].as_str().unwrap().starts_with("Mock"));
    // The live endpoint is still tried first.
    assert_eq!(mock.calls().len(), 1);
}

fn whatsapp_router(base_url: Url) -> Router {
    let mut router = Router::new();
    router.register(Box::new(api::whatsapp::WhatsAppApi::new(Some(
        connectors::whatsapp::WhatsAppConnector::with_base_url(
            "tok".into(),
            "15550001111".into(),
            base_url,
        ),
    ))));
    router
}

#[tokio::test]
async fn media_upload_posts_to_the_phone_number_endpoint() {
    use base64::Engine;

    let mock = MockVendor::start().await;
    let router = whatsapp_router(mock.base_url());

    mock.enqueue(200, json!({"id": "media_123"}));
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"\x89PNG fake bytes");
    let body = format!(
        r#"{{"filename": "pixel.png", "media_type": "image/png", "data": "{encoded}"}}"#
    );
    let reply = router
        .route(Method::POST, "/api/whatsapp/media", "", None, body.as_bytes())
        .await;

    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(body_json(reply).await["id"], "media_123");
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "/15550001111/media");
}

#[tokio::test]
async fn media_upload_rejects_bad_base64_before_any_call() {
    let mock = MockVendor::start().await;
    let router = whatsapp_router(mock.base_url());

    let reply = router
        .route(
            Method::POST,
            "/api/whatsapp/media",
            "",
            None,
            br#"{"filename": "pixel.png", "media_type": "image/png", "data": "%%%"}"#,
        )
        .await;

    assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(reply).await["error"], "data is not valid base64");
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn simulation_off_mirrors_gated_rejections() {
    let mock = MockVendor::start().await;
    let router = sales_nav_router(mock.base_url(), false);

    mock.enqueue(403, json!({"message": "not a partner"}));
    let reply = router
        .route(
            Method::GET,
            "/api/linkedin-sales/profile",
            "instance_id=i1&partner=crm&record_id=r1",
            None,
            b"",
        )
        .await;

    assert_eq!(reply.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(reply).await["message"], "not a partner");
}
