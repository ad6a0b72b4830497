mod common;

use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_save_with_custom_alias() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "ex1" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "OK", "alias": "ex1" }));

    let stored: String = sqlx::query_scalar("SELECT target_url FROM url WHERE alias = 'ex1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "https://example.com");
}

#[tokio::test]
async fn test_save_generates_alias_when_missing() {
    let pool = common::create_test_pool().await;
    let server = TestServer::new(common::test_app(common::create_test_state(pool))).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "url": "https://example.com/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "OK");

    let alias = json["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 6);
    assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_save_blank_alias_is_generated() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["alias"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_save_duplicate_alias_conflict() {
    let pool = common::create_test_pool().await;
    common::insert_alias(&pool, "ex1", "https://example.com").await;
    let server = TestServer::new(common::test_app(common::create_test_state(pool.clone()))).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "url": "https://other.com", "alias": "ex1" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"], "URL already exists");

    let stored: String = sqlx::query_scalar("SELECT target_url FROM url WHERE alias = 'ex1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "https://example.com");
}

#[tokio::test]
async fn test_save_missing_url() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "alias": "ex1" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"], "field url is a required field");
}

#[tokio::test]
async fn test_save_invalid_url() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "field url is not a valid URL");
}

#[tokio::test]
async fn test_save_malformed_body() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::AUTH_HEADER)
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Failed to decode request");
}

#[tokio::test]
async fn test_save_requires_auth() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.header("www-authenticate"),
        "Basic realm=\"url-shortener\""
    );
}

#[tokio::test]
async fn test_save_wrong_password() {
    let server = TestServer::new(common::test_app(common::create_memory_state())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::WRONG_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Error");
}
