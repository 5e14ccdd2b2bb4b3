//! Handlers for magazine issues.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::{require_non_empty, validate_title};
use campus_db::models::magazine::{CreateMagazine, UpdateMagazine};
use campus_db::repositories::MagazineRepo;

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "magazine";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Magazine",
        id,
    })
}

/// GET /api/v1/magazines
pub async fn list_magazines(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let issues = MagazineRepo::list(&state.pool, true, limit, offset).await?;
    Ok(Json(DataResponse { data: issues }))
}

/// GET /api/v1/magazines/{id}
pub async fn get_magazine(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let issue = MagazineRepo::find_by_id(&state.pool, id, true)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: issue }))
}

/// GET /api/v1/admin/magazines
pub async fn admin_list_magazines(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let issues = MagazineRepo::list(&state.pool, false, limit, offset).await?;
    Ok(Json(DataResponse { data: issues }))
}

/// POST /api/v1/admin/magazines
///
/// `pdf_url` normally comes from an upload to the `documents` bucket.
pub async fn create_magazine(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMagazine>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    require_non_empty("PDF URL", &input.pdf_url)?;
    check_display_order(input.display_order)?;

    let issue = MagazineRepo::create(&state.pool, &input).await?;
    content_changed(&state, ENTITY, issue.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: issue })))
}

/// PUT /api/v1/admin/magazines/{id}
pub async fn update_magazine(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMagazine>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    if let Some(url) = &input.pdf_url {
        require_non_empty("PDF URL", url)?;
    }
    check_display_order(input.display_order)?;

    let issue = MagazineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    content_changed(&state, ENTITY, id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: issue }))
}

/// DELETE /api/v1/admin/magazines/{id}
pub async fn delete_magazine(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MagazineRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    content_changed(&state, ENTITY, id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
