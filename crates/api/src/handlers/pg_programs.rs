//! Handlers for postgraduate programmes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::validate_title;
use campus_db::models::pg_program::{CreatePgProgram, UpdatePgProgram};
use campus_db::repositories::PgProgramRepo;

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "pg_program";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PgProgram",
        id,
    })
}

/// GET /api/v1/pg-programs
pub async fn list_programs(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let programs = PgProgramRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: programs }))
}

/// GET /api/v1/pg-programs/{id}
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let program = PgProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: program }))
}

/// POST /api/v1/admin/pg-programs
pub async fn create_program(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePgProgram>,
) -> AppResult<impl IntoResponse> {
    validate_title("Name", &input.name)?;
    check_display_order(input.display_order)?;

    let program = PgProgramRepo::create(&state.pool, &input).await?;
    content_changed(&state, ENTITY, program.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: program })))
}

/// PUT /api/v1/admin/pg-programs/{id}
pub async fn update_program(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePgProgram>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_title("Name", name)?;
    }
    check_display_order(input.display_order)?;

    let program = PgProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    content_changed(&state, ENTITY, id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: program }))
}

/// DELETE /api/v1/admin/pg-programs/{id}
pub async fn delete_program(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PgProgramRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    content_changed(&state, ENTITY, id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
