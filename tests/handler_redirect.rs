mod common;

use axum::http::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "redirect1", "https://example.com/target").await;

    let server = common::make_server(state);

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::FOUND);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server.get("/nonexistent").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "cnt1", "https://example.com").await;

    let server = common::make_server(state);

    server.get("/cnt1").await.assert_status(StatusCode::FOUND);
    server.get("/cnt1").await.assert_status(StatusCode::FOUND);

    let response = server.get("/links/cnt1").await;
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["clicks"], 2);
    assert!(json["lastClickedAt"].is_string());
}

#[tokio::test]
async fn test_redirect_missing_code_does_not_touch_other_links() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "keep1", "https://example.com").await;

    let server = common::make_server(state);

    server.get("/keep2").await.assert_status_not_found();

    let response = server.get("/links/keep1").await;
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["clicks"], 0);
    assert!(json["lastClickedAt"].is_null());
}

#[tokio::test]
async fn test_redirect_after_delete_is_not_found() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "gone1", "https://example.com").await;

    let server = common::make_server(state);

    server.get("/gone1").await.assert_status(StatusCode::FOUND);
    server
        .delete("/links/gone1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/gone1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_store_failure_is_opaque() {
    let state = common::state_for(Arc::new(common::UnreachableStore));
    let server = common::make_server(state);

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.text();
    assert!(body.contains("internal_error"));
    assert!(!body.contains("10.0.0.5"));
}

#[tokio::test]
async fn test_redirect_unusable_location_is_internal_error() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "bad1", "https://example.com/\nInjected: yes").await;

    let server = common::make_server(state);

    server
        .get("/bad1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
