//! Handlers for lessons nested under a course.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::validate_title;
use campus_db::models::lesson::{CreateLesson, Lesson, UpdateLesson};
use campus_db::repositories::LessonRepo;

use super::access::{accessible_course, owned_course};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireInstructor;
use crate::response::DataResponse;
use crate::state::AppState;

async fn load_lesson(state: &AppState, id: DbId) -> AppResult<Lesson> {
    LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))
}

/// GET /api/v1/courses/{id}/lessons
///
/// Ordered by position. Requires an active enrollment, ownership or admin.
pub async fn list_lessons(
    user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    accessible_course(&state, &user, course_id).await?;
    let lessons = LessonRepo::list_for_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// POST /api/v1/courses/{id}/lessons
pub async fn create_lesson(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateLesson>,
) -> AppResult<impl IntoResponse> {
    owned_course(&state, &user, course_id).await?;
    validate_title("Title", &input.title)?;

    let lesson = LessonRepo::create(&state.pool, course_id, &input).await?;

    tracing::info!(
        lesson_id = lesson.id,
        course_id,
        user_id = user.user_id,
        "Lesson created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// PUT /api/v1/lessons/{id}
pub async fn update_lesson(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLesson>,
) -> AppResult<impl IntoResponse> {
    let lesson = load_lesson(&state, id).await?;
    owned_course(&state, &user, lesson.course_id).await?;
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }

    let lesson = LessonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))?;

    Ok(Json(DataResponse { data: lesson }))
}

/// DELETE /api/v1/lessons/{id}
pub async fn delete_lesson(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let lesson = load_lesson(&state, id).await?;
    owned_course(&state, &user, lesson.course_id).await?;

    LessonRepo::delete(&state.pool, id).await?;
    tracing::info!(lesson_id = id, user_id = user.user_id, "Lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}
