//! Handlers for the staff directory. Inactive staff are hidden publicly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::require_non_empty;
use campus_db::models::personnel::{CreatePersonnel, UpdatePersonnel};
use campus_db::repositories::PersonnelRepo;

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "personnel";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Personnel",
        id,
    })
}

/// GET /api/v1/personnel
pub async fn list_personnel(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let staff = PersonnelRepo::list(&state.pool, true, limit, offset).await?;
    Ok(Json(DataResponse { data: staff }))
}

/// GET /api/v1/personnel/{id}
pub async fn get_personnel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = PersonnelRepo::find_by_id(&state.pool, id, true)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// GET /api/v1/admin/personnel
pub async fn admin_list_personnel(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let staff = PersonnelRepo::list(&state.pool, false, limit, offset).await?;
    Ok(Json(DataResponse { data: staff }))
}

/// POST /api/v1/admin/personnel
pub async fn create_personnel(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePersonnel>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("Full name", &input.full_name)?;
    check_display_order(input.display_order)?;

    let member = PersonnelRepo::create(&state.pool, &input).await?;
    content_changed(&state, ENTITY, member.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/personnel/{id}
pub async fn update_personnel(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePersonnel>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.full_name {
        require_non_empty("Full name", name)?;
    }
    check_display_order(input.display_order)?;

    let member = PersonnelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    content_changed(&state, ENTITY, id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/personnel/{id}
pub async fn delete_personnel(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PersonnelRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    content_changed(&state, ENTITY, id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
