use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gep_api::config::ServerConfig;
use gep_api::router::build_app_router;
use gep_api::state::AppState;
use gep_mailer::{MailSettings, MailTransport, Mailer, MemoryTransport, OutboundEmail};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
    }
}

/// Addressing settings with every address configured, so tests can assert
/// the full sender/recipient policy.
pub fn test_mail_settings() -> MailSettings {
    MailSettings {
        admin_email: Some("admin@example.com".to_string()),
        from_email: Some("hello@example.com".to_string()),
        no_reply_email: Some("noreply@example.com".to_string()),
        default_sender: Some("noreply@example.com".to_string()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an in-memory mail transport.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses. The returned
/// transport handle exposes every email the app schedules.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<MemoryTransport>) {
    let config = test_config();
    let transport = Arc::new(MemoryTransport::new());
    let mailer = Mailer::new(
        Arc::clone(&transport) as Arc<dyn MailTransport>,
        test_mail_settings(),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: Arc::new(mailer),
    };

    (build_app_router(state, &config), transport)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON value to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body (for malformed-JSON cases).
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait until the transport has accepted `count` messages.
///
/// Dispatch is fire and forget, so the response can arrive before the
/// spawned send tasks have run.
pub async fn wait_for_emails(transport: &MemoryTransport, count: usize) -> Vec<OutboundEmail> {
    for _ in 0..100 {
        let sent = transport.sent().await;
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {count} dispatched email(s)");
}
