//! Handlers for news articles.
//!
//! The public endpoints only see published articles; admins see drafts too.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::validate_title;
use campus_db::models::news::{CreateNewsArticle, UpdateNewsArticle};
use campus_db::repositories::NewsRepo;

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "news";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "NewsArticle",
        id,
    })
}

/// GET /api/v1/news
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let articles = NewsRepo::list(&state.pool, true, limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/news/{id}
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = NewsRepo::find_by_id(&state.pool, id, true)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: article }))
}

/// GET /api/v1/admin/news
///
/// Includes unpublished drafts.
pub async fn admin_list_news(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let articles = NewsRepo::list(&state.pool, false, limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// POST /api/v1/admin/news
pub async fn create_news(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNewsArticle>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    check_display_order(input.display_order)?;

    let article = NewsRepo::create(&state.pool, &input).await?;
    content_changed(&state, ENTITY, article.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/news/{id}
pub async fn update_news(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNewsArticle>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    check_display_order(input.display_order)?;

    let article = NewsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    content_changed(&state, ENTITY, id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/news/{id}
pub async fn delete_news(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    content_changed(&state, ENTITY, id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
