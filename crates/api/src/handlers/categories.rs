//! Handlers for student categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::require_non_empty;
use campus_db::models::student_category::{CreateStudentCategory, UpdateStudentCategory};
use campus_db::repositories::StudentCategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "StudentCategory",
        id,
    })
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = StudentCategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStudentCategory>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("Name", &input.name)?;

    let category = StudentCategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        category_id = category.id,
        name = %category.name,
        admin_id = admin.user_id,
        "Student category created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
pub async fn update_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudentCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        require_non_empty("Name", name)?;
    }

    let category = StudentCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Profiles in the category keep their row; the reference is cleared.
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StudentCategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, admin_id = admin.user_id, "Student category deleted");
    Ok(StatusCode::NO_CONTENT)
}
