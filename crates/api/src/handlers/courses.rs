//! Handlers for the `/courses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_core::validation::{validate_pricing, validate_title};
use campus_db::models::course::{CreateCourse, UpdateCourse};
use campus_db::repositories::CourseRepo;

use super::access::{load_course, owned_course};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireInstructor;
use crate::query::{CourseListParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/courses
///
/// Published courses only, optionally filtered by `?category=`.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let courses =
        CourseRepo::list(&state.pool, params.category.as_deref(), true, limit, offset).await?;

    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{id}
///
/// Unpublished courses are only visible to their instructor and admins.
pub async fn get_course(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state, id).await?;
    let can_see_draft = user
        .as_ref()
        .is_some_and(|u| u.is_admin() || u.user_id == course.instructor_id);
    if !course.is_published && !can_see_draft {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/courses
///
/// The caller becomes the course instructor.
pub async fn create_course(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_title("Title", &input.title)?;
    validate_pricing(input.is_paid, input.price_minor)?;

    let course = CourseRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        course_id = course.id,
        title = %course.title,
        is_paid = course.is_paid,
        user_id = user.user_id,
        "Course created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
///
/// Pricing is validated against the merged row: switching a course to free
/// clears its price.
pub async fn update_course(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    let existing = owned_course(&state, &user, id).await?;

    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }
    let is_paid = input.is_paid.unwrap_or(existing.is_paid);
    if is_paid {
        validate_pricing(true, input.price_minor.or(existing.price_minor))?;
    } else {
        validate_pricing(false, input.price_minor)?;
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    tracing::info!(course_id = id, user_id = user.user_id, "Course updated");

    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
///
/// Lessons, quizzes and enrollments go with the course.
pub async fn delete_course(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    owned_course(&state, &user, id).await?;

    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }

    tracing::info!(course_id = id, user_id = user.user_id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
