//! Course, lesson, quiz and question routes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{courses, enrollments, lessons, quizzes};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                -> list_courses
/// POST   /                -> create_course
/// GET    /{id}            -> get_course
/// PUT    /{id}            -> update_course
/// DELETE /{id}            -> delete_course
/// GET    /{id}/lessons    -> list_lessons
/// POST   /{id}/lessons    -> create_lesson
/// GET    /{id}/quizzes    -> list_quizzes
/// POST   /{id}/quizzes    -> create_quiz
/// POST   /{id}/enroll     -> enroll
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/{id}/lessons",
            get(lessons::list_lessons).post(lessons::create_lesson),
        )
        .route(
            "/{id}/quizzes",
            get(quizzes::list_quizzes).post(quizzes::create_quiz),
        )
        .route("/{id}/enroll", post(enrollments::enroll))
}

/// Routes mounted at `/lessons`.
pub fn lesson_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(lessons::update_lesson).delete(lessons::delete_lesson),
    )
}

/// Routes mounted at `/quizzes`.
///
/// ```text
/// GET    /{id}                       -> get_quiz (player view)
/// PUT    /{id}                       -> update_quiz
/// DELETE /{id}                       -> delete_quiz
/// GET    /{id}/questions             -> list_questions
/// POST   /{id}/questions             -> create_question
/// POST   /{id}/submissions           -> submit_quiz
/// GET    /{id}/submissions/latest    -> latest_submission
/// ```
pub fn quiz_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route(
            "/{id}/questions",
            get(quizzes::list_questions).post(quizzes::create_question),
        )
        .route("/{id}/submissions", post(quizzes::submit_quiz))
        .route(
            "/{id}/submissions/latest",
            get(quizzes::latest_submission),
        )
}

/// Routes mounted at `/questions`.
pub fn question_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(quizzes::update_question).delete(quizzes::delete_question),
    )
}
