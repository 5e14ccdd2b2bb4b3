#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use campus_api::auth::jwt::{generate_access_token, JwtConfig};
use campus_api::auth::password::hash_password;
use campus_api::config::{PaymentConfig, ServerConfig, StorageConfig};
use campus_api::gateway::{InitializeRequest, InitializeResponse, PaymentGateway};
use campus_api::router::build_app_router;
use campus_api::state::AppState;
use campus_api::storage::LocalObjectStore;
use campus_core::error::CoreError;
use campus_db::models::profile::{CreateProfile, Profile};
use campus_db::repositories::ProfileRepo;

pub const WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Gateway stub: every checkout succeeds with a predictable URL.
pub struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> Result<InitializeResponse, CoreError> {
        Ok(InitializeResponse {
            authorization_url: format!("https://checkout.test/{}", request.reference),
            access_code: Some("stub-access".into()),
            reference: request.reference.clone(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and a private storage root.
pub fn test_config() -> ServerConfig {
    let storage_root: PathBuf =
        std::env::temp_dir().join(format!("campus-test-{}", uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&storage_root).expect("storage root should be creatable");
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: test_jwt_config(),
        storage: StorageConfig {
            root: storage_root,
            public_prefix: "/storage".to_string(),
            max_upload_bytes: 1024 * 1024,
        },
        payment: PaymentConfig {
            gateway_url: "http://gateway.invalid".to_string(),
            gateway_secret: WEBHOOK_SECRET.to_string(),
            callback_url: None,
        },
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build the full application router, using the given database pool.
///
/// Same middleware stack as `main.rs`; the gateway is stubbed and objects
/// land in a throwaway directory.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`], with a caller-supplied config so several apps
/// can share one storage root.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(campus_events::EventBus::default()),
        gateway: Arc::new(StubGateway),
        store: Arc::new(LocalObjectStore::new(
            config.storage.root.clone(),
            config.storage.public_prefix.clone(),
        )),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a profile with [`TEST_PASSWORD`] and return it with an access token.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> (Profile, String) {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            full_name: format!("User {email}"),
            role: role.to_string(),
            category_id: None,
        },
    )
    .await
    .expect("profile creation should succeed");
    let token = generate_access_token(profile.id, &profile.role, &test_jwt_config())
        .expect("token generation should succeed");
    (profile, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::get(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        Request::put(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::delete(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
