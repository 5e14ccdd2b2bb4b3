//! Admin uploads into the object store.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::storage::{object_key, validate_upload};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/uploads/{bucket}
///
/// Multipart form with a required `file` field. The object gets a fresh
/// key; the response carries its public URL.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let ext = validate_upload(
        &bucket,
        &filename,
        data.len(),
        state.config.storage.max_upload_bytes,
    )?;
    let key = object_key(&ext);
    let stored = state.store.put(&bucket, &key, &data).await?;

    tracing::info!(
        bucket = %stored.bucket,
        key = %stored.key,
        size_bytes = data.len(),
        admin_id = admin.user_id,
        "Object uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

/// DELETE /api/v1/admin/uploads/{bucket}/{key}
pub async fn delete_upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.store.delete(&bucket, &key).await?;
    tracing::info!(bucket = %bucket, key = %key, admin_id = admin.user_id, "Object deleted");
    Ok(StatusCode::NO_CONTENT)
}
