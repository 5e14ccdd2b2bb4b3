//! Handlers for the leadership roll (past and present heads).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::require_non_empty;
use campus_db::models::leadership::{CreateLeader, UpdateLeader};
use campus_db::repositories::LeadershipRepo;

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "leadership";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Leader",
        id,
    })
}

fn check_tenure(start: Option<i32>, end: Option<i32>) -> AppResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Tenure end ({end}) is before its start ({start})"
            ))));
        }
    }
    Ok(())
}

/// GET /api/v1/leadership
pub async fn list_leaders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let leaders = LeadershipRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: leaders }))
}

/// GET /api/v1/leadership/{id}
pub async fn get_leader(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let leader = LeadershipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: leader }))
}

/// POST /api/v1/admin/leadership
pub async fn create_leader(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLeader>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("Full name", &input.full_name)?;
    require_non_empty("Title", &input.title)?;
    check_tenure(input.tenure_start, input.tenure_end)?;
    check_display_order(input.display_order)?;

    let leader = LeadershipRepo::create(&state.pool, &input).await?;
    content_changed(&state, ENTITY, leader.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: leader })))
}

/// PUT /api/v1/admin/leadership/{id}
///
/// The tenure is checked against the merged row.
pub async fn update_leader(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLeader>,
) -> AppResult<impl IntoResponse> {
    let existing = LeadershipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &input.full_name {
        require_non_empty("Full name", name)?;
    }
    check_tenure(
        input.tenure_start.or(existing.tenure_start),
        input.tenure_end.or(existing.tenure_end),
    )?;
    check_display_order(input.display_order)?;

    let leader = LeadershipRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    content_changed(&state, ENTITY, id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: leader }))
}

/// DELETE /api/v1/admin/leadership/{id}
pub async fn delete_leader(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LeadershipRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    content_changed(&state, ENTITY, id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
