// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pin_extractor::{handlers, state::AppState};

/// Build the application router with a real outbound client.
pub fn create_test_app() -> Router {
    let state = AppState::new().expect("Failed to build HTTP client");
    Router::new()
        .route("/", get(handlers::pins::get_pin))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

// ── Upstream helpers ─────────────────────────────────────────────────────────

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve a fixed HTML page at `/pin/` and return its URL.
pub async fn spawn_pin_page(html: String) -> String {
    let app = Router::new().route(
        "/pin/",
        get(move || {
            let html = html.clone();
            async move { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html) }
        }),
    );
    format!("{}/pin/", spawn_upstream(app).await)
}

/// Wrap a pin record the way the closeup page embeds it.
pub fn closeup_payload(pin: Value) -> Value {
    serde_json::json!({
        "requestParameters": { "name": "CloseupDetailQuery", "options": {} },
        "response": { "data": { "v3GetPinQuery": { "data": pin } } }
    })
}

pub fn relay_script(body: &str) -> String {
    format!(r#"<script data-relay-response="true" type="application/json">{body}</script>"#)
}

pub fn html_page(scripts: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Pin</title></head><body><div id=\"root\"></div>{}</body></html>",
        scripts.concat()
    )
}

/// `/?url=<percent-encoded target>`
pub fn pin_uri(target: &str) -> String {
    format!("/?url={}", urlencoding::encode(target))
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
