//! Site settings: a JSON value per key.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::validation::require_non_empty;
use campus_db::repositories::SettingRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PutSettingRequest {
    pub value: serde_json::Value,
}

/// GET /api/v1/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let setting = SettingRepo::get(&state.pool, &key)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(DataResponse { data: setting }))
}

/// GET /api/v1/admin/settings
pub async fn list_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings/{key}
///
/// Create or replace the value stored under `key`.
pub async fn put_setting(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<PutSettingRequest>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("Key", &key)?;
    if input.value.is_null() {
        return Err(AppError::Core(CoreError::Validation(
            "Setting value must not be null".into(),
        )));
    }

    let setting = SettingRepo::upsert(&state.pool, &key, &input.value, admin.user_id).await?;

    tracing::info!(key = %key, admin_id = admin.user_id, "Site setting updated");

    Ok(Json(DataResponse { data: setting }))
}
