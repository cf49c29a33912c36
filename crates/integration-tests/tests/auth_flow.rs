//! Integration tests for register / login / logout flows.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use kloudcart_client::shop::Shop;
use kloudcart_client::status::Severity;
use kloudcart_integration_tests::MockApi;

async fn shop_against_mock() -> (MockApi, Shop) {
    let mock = MockApi::spawn().await;
    let shop = Shop::new(&mock.client_config());
    (mock, shop)
}

#[tokio::test]
async fn test_login_stores_token_and_sets_status() {
    let (_mock, shop) = shop_against_mock().await;

    assert!(shop.login("a@b.com", "x").await);

    let token = shop.session_token().expect("token stored");
    assert_eq!(token.expose(), "tok123");
    assert_eq!(shop.status().unwrap().to_string(), "✅ Logged in!");
}

#[tokio::test]
async fn test_login_failure_leaves_session_absent() {
    let (mock, shop) = shop_against_mock().await;
    mock.plan_login(
        StatusCode::UNAUTHORIZED,
        json!({"msg": "Invalid credentials"}),
    );

    shop.login("a@b.com", "wrong").await;

    assert!(!shop.is_logged_in());
    let status = shop.status().unwrap();
    assert_eq!(status.severity(), Severity::Failure);
    assert_eq!(status.to_string(), "❌ Invalid credentials");
}

#[tokio::test]
async fn test_relogin_overwrites_prior_token() {
    let (mock, shop) = shop_against_mock().await;

    shop.login("a@b.com", "x").await;
    assert_eq!(shop.session_token().unwrap().expose(), "tok123");

    mock.plan_login(StatusCode::OK, json!({"access_token": "tok456"}));
    shop.login("a@b.com", "x").await;
    assert_eq!(shop.session_token().unwrap().expose(), "tok456");
}

#[tokio::test]
async fn test_failed_relogin_keeps_prior_token() {
    let (mock, shop) = shop_against_mock().await;

    shop.login("a@b.com", "x").await;
    mock.plan_login(StatusCode::UNAUTHORIZED, json!({"msg": "expired password"}));
    shop.login("a@b.com", "x").await;

    // Failure reported, but the earlier session survives
    assert_eq!(shop.status().unwrap().to_string(), "❌ expired password");
    assert_eq!(shop.session_token().unwrap().expose(), "tok123");
}

#[tokio::test]
async fn test_register_success_does_not_authenticate() {
    let (_mock, shop) = shop_against_mock().await;

    assert!(shop.register("alice", "s3cret").await);

    assert!(!shop.is_logged_in());
    assert_eq!(
        shop.status().unwrap().to_string(),
        "✅ Registered! You can log in now."
    );
}

#[tokio::test]
async fn test_register_conflict_surfaces_server_message() {
    let (mock, shop) = shop_against_mock().await;
    mock.plan_register(StatusCode::CONFLICT, json!({"msg": "user exists"}));

    shop.register("alice", "s3cret").await;

    assert_eq!(shop.status().unwrap().to_string(), "❌ user exists");
}

#[tokio::test]
async fn test_register_failure_without_body_gets_generic_fallback() {
    let (mock, shop) = shop_against_mock().await;
    mock.plan_register(StatusCode::INTERNAL_SERVER_ERROR, json!(null));

    shop.register("alice", "s3cret").await;

    let status = shop.status().unwrap();
    assert_eq!(status.severity(), Severity::Failure);
    assert_eq!(status.text(), "Error");
}

#[tokio::test]
async fn test_unreachable_server_reports_network_failure() {
    // Port 1 is never serving; the connection is refused
    let config = kloudcart_client::config::ClientConfig::new(
        url::Url::parse("http://127.0.0.1:1").unwrap(),
    );
    let shop = Shop::new(&config);

    shop.login("a@b.com", "x").await;

    assert!(!shop.is_logged_in());
    assert_eq!(shop.status().unwrap().to_string(), "❌ Network error");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (_mock, shop) = shop_against_mock().await;

    shop.login("a@b.com", "x").await;
    assert!(shop.is_logged_in());

    shop.logout();

    assert!(!shop.is_logged_in());
    assert_eq!(
        shop.status().unwrap().to_string(),
        "✅ You have been logged out."
    );
}
