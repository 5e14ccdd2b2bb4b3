//! Course-level authorization checks shared by the learning handlers.

use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::course::Course;
use campus_db::repositories::{CourseRepo, EnrollmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load a course or fail with 404.
pub async fn load_course(state: &AppState, course_id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))
}

/// The course, if `user` owns it or is an admin.
pub async fn owned_course(state: &AppState, user: &AuthUser, course_id: DbId) -> AppResult<Course> {
    let course = load_course(state, course_id).await?;
    if user.is_admin() || course.instructor_id == user.user_id {
        Ok(course)
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only the course instructor or an admin may change this course".into(),
        )))
    }
}

/// The course, if `user` may study it: active enrollment, ownership, or admin.
pub async fn accessible_course(
    state: &AppState,
    user: &AuthUser,
    course_id: DbId,
) -> AppResult<Course> {
    let course = load_course(state, course_id).await?;
    if user.is_admin() || course.instructor_id == user.user_id {
        return Ok(course);
    }
    if EnrollmentRepo::has_active_access(&state.pool, user.user_id, course_id).await? {
        return Ok(course);
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Enroll in this course to access its lessons and quizzes".into(),
    )))
}
