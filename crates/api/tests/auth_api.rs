//! Authentication and authorization boundary tests.
//!
//! These exercise the extractor layer (Bearer parsing, kind and role
//! checks) which rejects requests before any database access.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

// ---------------------------------------------------------------------------
// Missing / malformed credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn staff_route_without_token_returns_401() {
    let app = common::build_test_app();
    let response = app.oneshot(get("/api/v1/activity", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_authorization_header_returns_401() {
    let app = common::build_test_app();
    let request = Request::builder()
        .uri("/api/v1/activity")
        .header("authorization", "Token abc123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app();
    let response = app
        .oneshot(get("/api/v1/activity", Some("not.a.jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn player_token_on_staff_route_returns_403() {
    let app = common::build_test_app();
    let token = common::player_token();

    let response = app
        .oneshot(get("/api/v1/activity", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Staff access required");
}

#[tokio::test]
async fn floor_staff_on_admin_route_returns_403() {
    let app = common::build_test_app();
    let token = common::staff_token("floor");

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/games")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"game_key":"nlh-5-10","name":"No Limit Hold'em"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin access required");
}

// ---------------------------------------------------------------------------
// Identity echo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_returns_the_token_principal() {
    let app = common::build_test_app();
    let token = common::staff_token("manager");

    let response = app
        .oneshot(get("/api/v1/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "staff");
    assert_eq!(json["data"]["role"], "manager");
    assert_eq!(json["data"]["name"], "Test Staff");
}

#[tokio::test]
async fn me_for_player_carries_card_number() {
    let app = common::build_test_app();
    let token = common::player_token();

    let response = app
        .oneshot(get("/api/v1/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "player");
    assert_eq!(json["data"]["card_number"], "12345");
}
