//! Handlers for the video and picture galleries.
//!
//! The gallery repositories retry while the schema cache catches up, so a
//! freshly migrated table answers 503 `NOT_YET_AVAILABLE` only after the
//! retries are spent.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::{require_non_empty, validate_title};
use campus_db::models::gallery::{
    CreateGalleryPicture, CreateGalleryVideo, UpdateGalleryPicture, UpdateGalleryVideo,
};
use campus_db::repositories::{GalleryPictureRepo, GalleryVideoRepo};

use super::content::{
    check_display_order, content_changed, ACTION_CREATED, ACTION_DELETED, ACTION_UPDATED,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// GET /api/v1/gallery/videos
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let videos = GalleryVideoRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// GET /api/v1/gallery/videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = GalleryVideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("GalleryVideo", id))?;
    Ok(Json(DataResponse { data: video }))
}

/// POST /api/v1/admin/gallery/videos
pub async fn create_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryVideo>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    require_non_empty("Video URL", &input.video_url)?;
    check_display_order(input.display_order)?;

    let video = GalleryVideoRepo::create(&state.pool, &input).await?;
    content_changed(&state, "gallery_video", video.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// PUT /api/v1/admin/gallery/videos/{id}
pub async fn update_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryVideo>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    check_display_order(input.display_order)?;

    let video = GalleryVideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("GalleryVideo", id))?;
    content_changed(&state, "gallery_video", id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: video }))
}

/// DELETE /api/v1/admin/gallery/videos/{id}
pub async fn delete_video(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GalleryVideoRepo::delete(&state.pool, id).await? {
        return Err(not_found("GalleryVideo", id));
    }
    content_changed(&state, "gallery_video", id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Pictures
// ---------------------------------------------------------------------------

/// GET /api/v1/gallery/pictures
pub async fn list_pictures(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let pictures = GalleryPictureRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: pictures }))
}

/// GET /api/v1/gallery/pictures/{id}
pub async fn get_picture(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let picture = GalleryPictureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("GalleryPicture", id))?;
    Ok(Json(DataResponse { data: picture }))
}

/// POST /api/v1/admin/gallery/pictures
pub async fn create_picture(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryPicture>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    require_non_empty("Image URL", &input.image_url)?;
    check_display_order(input.display_order)?;

    let picture = GalleryPictureRepo::create(&state.pool, &input).await?;
    content_changed(&state, "gallery_picture", picture.id, ACTION_CREATED, admin.user_id);

    Ok((StatusCode::CREATED, Json(DataResponse { data: picture })))
}

/// PUT /api/v1/admin/gallery/pictures/{id}
pub async fn update_picture(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryPicture>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    check_display_order(input.display_order)?;

    let picture = GalleryPictureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("GalleryPicture", id))?;
    content_changed(&state, "gallery_picture", id, ACTION_UPDATED, admin.user_id);

    Ok(Json(DataResponse { data: picture }))
}

/// DELETE /api/v1/admin/gallery/pictures/{id}
pub async fn delete_picture(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GalleryPictureRepo::delete(&state.pool, id).await? {
        return Err(not_found("GalleryPicture", id));
    }
    content_changed(&state, "gallery_picture", id, ACTION_DELETED, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
