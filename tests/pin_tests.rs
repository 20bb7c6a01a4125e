mod common;

use axum::{http::StatusCode, routing::get, Router};
use serde_json::json;

#[tokio::test]
async fn missing_url_returns_400() {
    let app = common::create_test_app();
    let (status, body) = common::get_json(app, "/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing url parameter" }));
}

#[tokio::test]
async fn empty_url_returns_400() {
    let app = common::create_test_app();
    let (status, body) = common::get_json(app, "/?url=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing url parameter" }));
}

#[tokio::test]
async fn repeated_url_returns_json_400() {
    let app = common::create_test_app();
    let (status, body) = common::get_json(app, "/?url=a&url=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap_or_default();
    assert!(!message.is_empty(), "expected a JSON error body, got {body}");
}

#[tokio::test]
async fn page_without_relay_scripts_returns_404() {
    let url = common::spawn_pin_page(common::html_page(&[])).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "got {status}: {body}");
    assert_eq!(body, json!({ "error": "Pin not found" }));
}

#[tokio::test]
async fn page_with_only_other_queries_returns_404() {
    let other = json!({ "requestParameters": { "name": "UserProfileQuery" } });
    let html = common::html_page(&[common::relay_script(&other.to_string())]);
    let url = common::spawn_pin_page(html).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "got {status}: {body}");
    assert_eq!(body["error"], "Pin not found");
}

#[tokio::test]
async fn minimal_pin_is_normalized() {
    let payload = common::closeup_payload(json!({ "entityId": "1", "title": "T" }));
    let html = common::html_page(&[common::relay_script(&payload.to_string())]);
    let url = common::spawn_pin_page(html).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::OK, "got {status}: {body}");
    assert_eq!(body["pin_id"], "1");
    assert_eq!(body["title"], "T");
    assert_eq!(body["media_type"], "image");
    assert_eq!(body["best_url"], serde_json::Value::Null);
    assert_eq!(body["all_images"], json!({}));
    assert_eq!(body["video_info"], serde_json::Value::Null);
    assert_eq!(body["extra"]["is_promoted"], false);
}

#[tokio::test]
async fn malformed_candidate_is_skipped() {
    let payload = common::closeup_payload(json!({ "entityId": "7" }));
    let html = common::html_page(&[
        common::relay_script("{\"requestParameters\": "),
        common::relay_script(&payload.to_string()),
    ]);
    let url = common::spawn_pin_page(html).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::OK, "got {status}: {body}");
    assert_eq!(body["pin_id"], "7");
}

#[tokio::test]
async fn missing_pin_record_returns_invalid_shape() {
    let payload = json!({
        "requestParameters": { "name": "CloseupDetailQuery" },
        "response": { "data": { "v3GetPinQuery": {} } }
    });
    let html = common::html_page(&[common::relay_script(&payload.to_string())]);
    let url = common::spawn_pin_page(html).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Invalid data structure" }));
}

#[tokio::test]
async fn video_pin_end_to_end() {
    let payload = common::closeup_payload(json!({
        "entityId": "55",
        "gridTitle": "Clip",
        "imageSpec_orig": { "url": "http://img/o.jpg" },
        "storyPinData": { "pages": [ { "blocks": [ { "videoDataV2": {
            "videoList720P": { "v720P": {
                "url": "http://v/720.mp4", "width": 720, "height": 1280,
                "duration": 8000, "thumbnail": "http://v/t.jpg"
            } },
            "videoListMobile": { "vHLSV3MOBILE": { "url": "http://v/m.m3u8", "duration": 8000 } }
        } } ] } ] }
    }));
    let html = common::html_page(&[common::relay_script(&payload.to_string())]);
    let url = common::spawn_pin_page(html).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&url)).await;
    assert_eq!(status, StatusCode::OK, "got {status}: {body}");
    assert_eq!(body["title"], "Clip");
    assert_eq!(body["media_type"], "video");
    assert_eq!(body["best_url"], "http://v/720.mp4");
    assert_eq!(body["all_images"], json!({ "orig": "http://img/o.jpg" }));
    assert_eq!(body["video_info"]["duration"], 8000);
    assert_eq!(body["video_info"]["width"], 720);
    assert_eq!(body["video_info"]["thumbnail"], "http://v/t.jpg");
    assert_eq!(
        body["video_info"]["qualities"]["mobile"]["url"],
        "http://v/m.m3u8"
    );
}

#[tokio::test]
async fn upstream_error_status_returns_500() {
    let upstream = Router::new().route(
        "/gone/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = common::spawn_upstream(upstream).await;

    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri(&format!("{base}/gone/"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap_or_default();
    assert!(!message.is_empty(), "expected an error message, got {body}");
}

#[tokio::test]
async fn unparseable_url_returns_500() {
    let app = common::create_test_app();
    let (status, body) = common::get_json(app, &common::pin_uri("not-a-url")).await;
    assert_eq!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR,
        "expected 500, got {status}: {body}"
    );
    assert!(body["error"].is_string());
}
