//! HTTP surface: bearer-token gating and JSON round trips through the
//! router.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{admin_session, setup_db, unprivileged_session};
use vending_catalog_api::{build_router, config::AppConfig, AppState};

async fn test_state() -> AppState {
    let db = setup_db().await;
    let config = AppConfig::new("sqlite::memory:", "test-secret-for-http-tests");
    AppState::new(db, config)
}

fn bearer(state: &AppState, session: &vending_catalog_api::auth::Session) -> String {
    let token = state
        .auth
        .issue_token(session, Duration::from_secs(3600))
        .unwrap();
    format!("Bearer {}", token)
}

#[tokio::test]
async fn health_endpoint_reports_database_up() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let state = test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/machine-categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn roleless_token_is_forbidden() {
    let state = test_state().await;
    let auth_header = bearer(&state, &unprivileged_session());
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/machine-categories")
                .header(header::AUTHORIZATION, auth_header)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_create_and_list_categories() {
    let state = test_state().await;
    let auth_header = bearer(&state, &admin_session());
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/machine-categories")
                .header(header::AUTHORIZATION, &auth_header)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "name": "Snack", "icon": "🍿" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/machine-categories")
                .header(header::AUTHORIZATION, &auth_header)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let categories: Value = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Snack"]);
}

#[tokio::test]
async fn blocked_category_delete_returns_conflict() {
    let state = test_state().await;
    let auth_header = bearer(&state, &admin_session());
    let app = build_router(state.clone());

    let category = common::create_category(&state.db, "Snack", None).await;
    common::create_product_type(&state.db, "Chips", category.id).await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/v1/machine-categories/{}", category.id))
                .header(header::AUTHORIZATION, auth_header)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let err: Value = serde_json::from_slice(&body).unwrap();
    assert!(err["message"]
        .as_str()
        .unwrap()
        .contains("1 product type(s)"));
}
