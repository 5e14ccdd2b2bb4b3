//! Learner dashboard: quiz progress per enrolled course.

use std::collections::HashMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::progress::{course_progress, ScoreRecord};
use campus_core::types::DbId;
use campus_db::models::quiz::Quiz;
use campus_db::repositories::{CourseRepo, EnrollmentRepo, QuizRepo, QuizSubmissionRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CourseProgressEntry {
    pub course_id: DbId,
    pub title: String,
    pub passed: usize,
    pub total: usize,
}

/// GET /api/v1/dashboard/progress
///
/// Recomputed on every call from active enrollments, their quizzes and the
/// caller's attempts.
pub async fn progress(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let course_ids = EnrollmentRepo::active_course_ids(&state.pool, user.user_id).await?;
    if course_ids.is_empty() {
        return Ok(Json(DataResponse {
            data: Vec::<CourseProgressEntry>::new(),
        }));
    }

    let quizzes = QuizRepo::list_for_courses(&state.pool, &course_ids).await?;
    let quiz_ids: Vec<DbId> = quizzes.iter().map(|q| q.id).collect();
    let scores: Vec<ScoreRecord> =
        QuizSubmissionRepo::scores_for_student(&state.pool, user.user_id, &quiz_ids)
            .await?
            .into_iter()
            .map(ScoreRecord::from)
            .collect();
    let refs: Vec<_> = quizzes.iter().map(Quiz::to_quiz_ref).collect();

    let titles: HashMap<DbId, String> = CourseRepo::list_by_ids(&state.pool, &course_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.title))
        .collect();

    let data: Vec<CourseProgressEntry> = course_progress(&course_ids, &refs, &scores)
        .into_iter()
        .map(|(course_id, p)| CourseProgressEntry {
            course_id,
            title: titles.get(&course_id).cloned().unwrap_or_default(),
            passed: p.passed,
            total: p.total,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}
