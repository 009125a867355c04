//! Route-level tests: exact status codes and JSON shapes.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use treats::receipts::memory::Endpoint;
use treats::ChannelId;
use treats_server::{plugin_manifest, router, AppState};
use treats_testkit::{channel_body, TestFixture};

fn app(fixture: &TestFixture) -> Router {
    router(AppState {
        maker: fixture.maker.clone(),
        manifest: plugin_manifest("https://treats.example.com", Some("agent.near")),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post(uri, body.to_string())
}

#[tokio::test]
async fn health_is_ok() {
    let fixture = TestFixture::new();
    let (status, body) = send(
        app(&fixture),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn manifest_is_served() {
    let fixture = TestFixture::new();
    let (status, body) = send(
        app(&fixture),
        Request::get("/plugin-manifest").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servers"][0]["url"], "https://treats.example.com");
    assert_eq!(body["x-mb"]["account-id"], "agent.near");
    assert!(body["paths"]["/tools/create-channel"].is_object());
    assert!(body["paths"]["/tools/mint-treat"].is_object());
}

#[tokio::test]
async fn create_channel_passes_upstream_body_through() {
    let fixture = TestFixture::new();
    fixture
        .receipts()
        .push_success(json!({"channelId": "c1", "apiKey": "k1", "name": "T"}))
        .await;

    let (status, body) = send(
        app(&fixture),
        post_json("/tools/create-channel", &channel_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"channelId": "c1", "apiKey": "k1", "name": "T"}));
    assert_eq!(fixture.stored_key("c1").await.as_deref(), Some("k1"));

    let calls = fixture.receipts().calls().await;
    assert_eq!(calls[0].api_key, "master-key");
    assert_eq!(calls[0].body["wallet"], "alice.near");
    assert_eq!(calls[0].body["reference"], "{\"k\":\"v\"}");
}

#[tokio::test]
async fn create_channel_accepts_query_string() {
    let fixture = TestFixture::new();

    let (status, _) = send(
        app(&fixture),
        post(
            "/tools/create-channel?title=Q&description=D&mediaUrl=https%3A%2F%2Fx.com%2Fi.png&reference=%7B%22a%22%3A1%7D&wallet=bob",
            Body::empty(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = fixture.receipts().calls().await;
    assert_eq!(calls[0].body["title"], "Q");
    assert_eq!(calls[0].body["reference"], "{\"a\":1}");
    assert_eq!(calls[0].body["wallet"], "bob.near");
}

#[tokio::test]
async fn create_channel_body_wins_over_query() {
    let fixture = TestFixture::new();

    let (status, _) = send(
        app(&fixture),
        post_json(
            "/tools/create-channel?title=FromQuery&wallet=query",
            &channel_body(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = fixture.receipts().calls().await;
    assert_eq!(calls[0].body["title"], "T");
    assert_eq!(calls[0].body["wallet"], "alice.near");
}

#[tokio::test]
async fn create_channel_wallet_required() {
    let fixture = TestFixture::new();
    let mut body = channel_body();
    body.as_object_mut().unwrap().remove("wallet");

    let (status, body) = send(app(&fixture), post_json("/tools/create-channel", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Wallet address required",
            "code": "WALLET_INPUT_REQUIRED",
            "message": "Please provide your NEAR wallet address",
        })
    );
    assert!(fixture.receipts().calls().await.is_empty());
}

#[tokio::test]
async fn create_channel_falls_back_to_default_account() {
    let fixture = TestFixture::with_default_account("agent.near");
    let mut body = channel_body();
    body.as_object_mut().unwrap().remove("wallet");

    let (status, _) = send(app(&fixture), post_json("/tools/create-channel", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fixture.receipts().calls().await[0].body["wallet"], "agent.near");
}

#[tokio::test]
async fn create_channel_missing_fields_echoes_input() {
    let fixture = TestFixture::new();

    let (status, body) = send(
        app(&fixture),
        post_json(
            "/tools/create-channel",
            &json!({"title": "T", "wallet": "alice"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Missing required fields",
            "received": {
                "title": "T",
                "description": null,
                "mediaUrl": null,
                "reference": null,
            },
        })
    );
}

#[tokio::test]
async fn create_channel_bad_media_url() {
    let fixture = TestFixture::new();
    let mut body = channel_body();
    body["mediaUrl"] = json!("ftp://x.com/i.png");

    let (status, body) = send(app(&fixture), post_json("/tools/create-channel", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Media URL must start with http/https"}));
}

#[tokio::test]
async fn create_channel_bad_reference() {
    let fixture = TestFixture::new();
    let mut body = channel_body();
    body["reference"] = json!("not json");

    let (status, body) = send(app(&fixture), post_json("/tools/create-channel", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Invalid reference format. Must be valid JSON",
            "received": "not json",
        })
    );
}

#[tokio::test]
async fn create_channel_upstream_rejection() {
    let fixture = TestFixture::new();
    fixture
        .receipts()
        .push_rejection(409, r#"{"message":"Channel exists"}"#)
        .await;

    let (status, body) = send(
        app(&fixture),
        post_json("/tools/create-channel", &channel_body()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "Channel exists"}));
}

#[tokio::test]
async fn create_channel_incomplete_upstream_body_is_internal() {
    let fixture = TestFixture::new();
    fixture.receipts().push_success(json!({"ok": true})).await;

    let (status, body) = send(
        app(&fixture),
        post_json("/tools/create-channel", &channel_body()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn mint_after_create_uses_channel_key() {
    let fixture = TestFixture::new();
    let app = app(&fixture);

    fixture
        .receipts()
        .push_success(json!({"channelId": "abc123", "apiKey": "xyz789"}))
        .await;
    let (status, _) = send(
        app.clone(),
        post_json("/tools/create-channel", &channel_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    fixture.receipts().push_success(json!({"txId": "tx1"})).await;
    let (status, body) = send(
        app,
        post_json(
            "/tools/mint-treat",
            &json!({"channelId": "abc123", "receiverId": "bob"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"txId": "tx1"}));

    let calls = fixture.receipts().calls().await;
    assert_eq!(calls[1].endpoint, Endpoint::Mint(ChannelId::from("abc123")));
    assert_eq!(calls[1].api_key, "xyz789");
    assert_eq!(calls[1].body, json!({"receiverId": "bob.near"}));
}

#[tokio::test]
async fn mint_missing_fields() {
    let fixture = TestFixture::new();
    fixture.add_channel("c1", "k1").await;

    let (status, body) = send(
        app(&fixture),
        post_json("/tools/mint-treat", &json!({"channelId": "c1"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Missing required fields. Need channelId and either receiverId or wallet"})
    );
}

#[tokio::test]
async fn mint_with_empty_store() {
    let fixture = TestFixture::new();

    let (status, body) = send(
        app(&fixture),
        post_json(
            "/tools/mint-treat",
            &json!({"channelId": "c1", "wallet": "bob"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Channel configuration not found"}));
}

#[tokio::test]
async fn mint_unknown_channel() {
    let fixture = TestFixture::new();
    fixture.add_channel("c1", "k1").await;

    let (status, body) = send(
        app(&fixture),
        post_json(
            "/tools/mint-treat",
            &json!({"channelId": "c2", "receiverId": "bob"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid channel ID"}));
}

#[tokio::test]
async fn mint_upstream_rejection_carries_details() {
    let fixture = TestFixture::new();
    fixture.add_channel("c1", "k1").await;
    fixture
        .receipts()
        .push_rejection(400, r#"{"message":"Already minted","code":"DUP"}"#)
        .await;

    let (status, body) = send(
        app(&fixture),
        post_json(
            "/tools/mint-treat",
            &json!({"channelId": "c1", "receiverId": "bob"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Already minted",
            "details": {"message": "Already minted", "code": "DUP"},
        })
    );
}

#[tokio::test]
async fn mint_malformed_body_is_internal() {
    let fixture = TestFixture::new();

    let (status, body) = send(app(&fixture), post("/tools/mint-treat", "{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(fixture.receipts().calls().await.is_empty());
}

#[tokio::test]
async fn mint_non_object_body_is_missing_fields() {
    let fixture = TestFixture::new();
    fixture.add_channel("c1", "k1").await;

    let (status, body) = send(app(&fixture), post_json("/tools/mint-treat", &json!([]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Missing required fields. Need channelId and either receiverId or wallet"})
    );
    assert!(fixture.receipts().calls().await.is_empty());
}

#[tokio::test]
async fn mint_numeric_channel_id_uses_its_text() {
    let fixture = TestFixture::new();
    fixture.add_channel("123", "k123").await;
    fixture.receipts().push_success(json!({"txId": "tx1"})).await;

    let (status, body) = send(
        app(&fixture),
        post_json(
            "/tools/mint-treat",
            &json!({"channelId": 123, "receiverId": "bob"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"txId": "tx1"}));

    let calls = fixture.receipts().calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, Endpoint::Mint(ChannelId::from("123")));
    assert_eq!(calls[0].api_key, "k123");
}
