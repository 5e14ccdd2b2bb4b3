//! Integration tests for the health endpoint and the shared HTTP stack.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, send};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_status(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["storage_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_storage_root_degrades_health(pool: PgPool) {
    let mut config = common::test_config();
    config.storage.root = config.storage.root.join("not-created");

    let response = get(common::build_test_app_with(pool, config), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["storage_healthy"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_routes_get_a_json_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_a_request_id(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id should be set")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/courses")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"), "got {methods}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_reject_missing_and_bad_tokens(pool: PgPool) {
    let missing = get(common::build_test_app(pool.clone()), "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = common::get_auth(common::build_test_app(pool), "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(garbage).await["code"], "UNAUTHORIZED");
}
