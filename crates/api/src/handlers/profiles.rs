//! Admin handlers for the `/admin/profiles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::validate_role;
use campus_core::types::DbId;
use campus_db::models::profile::ProfileResponse;
use campus_db::repositories::{ProfileRepo, StudentCategoryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, ProfileListParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category_id: Option<DbId>,
}

fn profile_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Profile",
        id,
    })
}

/// GET /api/v1/admin/profiles
///
/// Optional `?role=` filter plus pagination.
pub async fn list_profiles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ProfileListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(role) = &params.role {
        validate_role(role)?;
    }
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let profiles = ProfileRepo::list(&state.pool, params.role.as_deref(), limit, offset).await?;
    let data: Vec<ProfileResponse> = profiles.iter().map(ProfileResponse::from).collect();

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/profiles/{id}/role
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    validate_role(&input.role)?;

    let profile = ProfileRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or_else(|| profile_not_found(id))?;

    tracing::info!(
        profile_id = id,
        role = %input.role,
        admin_id = admin.user_id,
        "Profile role updated",
    );

    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

/// PUT /api/v1/admin/profiles/{id}/category
///
/// `category_id: null` clears the category.
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    if let Some(category_id) = input.category_id {
        StudentCategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "StudentCategory",
                id: category_id,
            }))?;
    }

    let profile = ProfileRepo::update_category(&state.pool, id, input.category_id)
        .await?
        .ok_or_else(|| profile_not_found(id))?;

    tracing::info!(
        profile_id = id,
        category_id = ?input.category_id,
        admin_id = admin.user_id,
        "Profile category updated",
    );

    Ok(Json(DataResponse {
        data: ProfileResponse::from(&profile),
    }))
}

/// DELETE /api/v1/admin/profiles/{id}
pub async fn delete_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }

    if !ProfileRepo::delete(&state.pool, id).await? {
        return Err(profile_not_found(id));
    }

    tracing::info!(profile_id = id, admin_id = admin.user_id, "Profile deleted");
    Ok(StatusCode::NO_CONTENT)
}
