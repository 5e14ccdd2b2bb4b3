pub mod admin;
pub mod auth;
pub mod content;
pub mod courses;
pub mod health;
pub mod learner;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/...                          signup, login, refresh, logout, me
///
/// /courses                           catalogue, authoring
/// /courses/{id}/lessons              lessons (enrolled, owner or admin)
/// /courses/{id}/quizzes              quizzes
/// /courses/{id}/enroll               free enrollment
/// /lessons/{id}                      update, delete
/// /quizzes/{id}                      player view, update, delete
/// /quizzes/{id}/questions            authoring view, create
/// /quizzes/{id}/submissions          submit, latest
/// /questions/{id}                    update, delete
///
/// /enrollments/me                    caller's enrollments
/// /dashboard/progress                quiz progress per course
/// /payments/initialize               hosted checkout
/// /payments/webhook                  gateway callback (signed)
/// /certificates/me, /certificates/{id}
///
/// /news, /magazines, /personnel, /leadership, /pg-programs,
/// /gallery/videos, /gallery/pictures, /categories, /settings/{key}
///
/// /admin/...                         see routes::admin
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/courses", courses::router())
        .nest("/lessons", courses::lesson_router())
        .nest("/quizzes", courses::quiz_router())
        .nest("/questions", courses::question_router())
        .nest("/enrollments", learner::enrollment_router())
        .nest("/dashboard", learner::dashboard_router())
        .nest("/payments", learner::payment_router())
        .nest("/certificates", learner::certificate_router())
        .merge(content::router())
        .nest("/admin", admin::router(max_upload_bytes))
}
