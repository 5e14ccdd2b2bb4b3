//! Liveness and dependency health, mounted at the root (outside `/api/v1`).

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the upload directory exists.
    pub storage_healthy: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = campus_db::health_check(&state.pool).await.is_ok();
    let storage_healthy = tokio::fs::metadata(&state.config.storage.root)
        .await
        .is_ok_and(|m| m.is_dir());

    let status = if db_healthy && storage_healthy {
        "ok"
    } else {
        "degraded"
    };
    if status != "ok" {
        tracing::warn!(db_healthy, storage_healthy, "Health check degraded");
    }

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
