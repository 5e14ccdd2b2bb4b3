//! Handlers for quiz authoring, the quiz player and submissions.
//!
//! Authoring endpoints (quizzes and questions with their correct keys) are
//! limited to the course owner or an admin. The player view and submissions
//! need lesson access: an active enrollment, ownership or admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::grading::{
    build_options, correct_key_for, grade, mark_option, AnswerMap, OptionMark, QuizOption,
    PASS_MARK,
};
use campus_core::types::{DbId, Score};
use campus_core::validation::{require_non_empty, validate_title};
use campus_db::models::quiz::{
    CreateQuiz, CreateQuizQuestion, CreateQuizSubmission, Quiz, QuizQuestion, QuizSubmission,
    UpdateQuiz, UpdateQuizQuestion,
};
use campus_db::repositories::{QuizQuestionRepo, QuizRepo, QuizSubmissionRepo};
use campus_events::bus::QUIZ_SUBMITTED;
use campus_events::PortalEvent;
use serde::{Deserialize, Serialize};

use super::access::{accessible_course, owned_course};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireInstructor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub position: Option<i32>,
}

/// Replacing `options` requires `correct_option_index` as well.
#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub prompt: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_option_index: Option<usize>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: AnswerMap,
}

/// A question as the quiz player sees it: no correct key.
#[derive(Debug, Serialize)]
pub struct PlayerQuestion {
    pub id: DbId,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub position: i32,
}

#[derive(Debug, Serialize)]
pub struct PlayerQuiz {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<PlayerQuestion>,
}

#[derive(Debug, Serialize)]
pub struct ReviewedOption {
    pub key: String,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Serialize)]
pub struct QuestionReview {
    pub question_id: DbId,
    pub prompt: String,
    pub selected: Option<String>,
    pub correct_option: String,
    pub is_correct: bool,
    pub options: Vec<ReviewedOption>,
}

/// A stored attempt with its per-question review.
#[derive(Debug, Serialize)]
pub struct GradedSubmission {
    pub submission: QuizSubmission,
    pub score: Score,
    pub passed: bool,
    pub correct: usize,
    pub total: usize,
    pub review: Vec<QuestionReview>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_quiz(state: &AppState, id: DbId) -> AppResult<Quiz> {
    QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quiz", id }))
}

async fn load_question(state: &AppState, id: DbId) -> AppResult<QuizQuestion> {
    QuizQuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuizQuestion",
            id,
        }))
}

/// Options and the key of the correct one, from authored texts.
fn keyed_options(texts: &[String], correct_index: usize) -> AppResult<(Vec<QuizOption>, String)> {
    let options = build_options(texts)?;
    let correct = correct_key_for(&options, correct_index)?;
    Ok((options, correct))
}

/// Mark every option of every question against the stored answers.
pub fn review(questions: &[QuizQuestion], answers: &AnswerMap) -> Vec<QuestionReview> {
    questions
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id).map(String::as_str);
            QuestionReview {
                question_id: q.id,
                prompt: q.prompt.clone(),
                selected: selected.map(str::to_owned),
                correct_option: q.correct_option.clone(),
                is_correct: selected == Some(q.correct_option.as_str()),
                options: q
                    .options
                    .0
                    .iter()
                    .map(|o| ReviewedOption {
                        key: o.key.clone(),
                        text: o.text.clone(),
                        mark: mark_option(&o.key, &q.correct_option, selected),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn graded(submission: QuizSubmission, questions: &[QuizQuestion]) -> GradedSubmission {
    let review = review(questions, &submission.answers.0);
    let correct = review.iter().filter(|r| r.is_correct).count();
    GradedSubmission {
        score: submission.score,
        passed: submission.score >= PASS_MARK,
        correct,
        total: questions.len(),
        review,
        submission,
    }
}

// ---------------------------------------------------------------------------
// Quiz authoring
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{id}/quizzes
pub async fn list_quizzes(
    user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    accessible_course(&state, &user, course_id).await?;
    let quizzes = QuizRepo::list_for_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: quizzes }))
}

/// POST /api/v1/courses/{id}/quizzes
pub async fn create_quiz(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateQuiz>,
) -> AppResult<impl IntoResponse> {
    owned_course(&state, &user, course_id).await?;
    validate_title("Title", &input.title)?;

    let quiz = QuizRepo::create(&state.pool, course_id, &input).await?;

    tracing::info!(
        quiz_id = quiz.id,
        course_id,
        user_id = user.user_id,
        "Quiz created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: quiz })))
}

/// PUT /api/v1/quizzes/{id}
pub async fn update_quiz(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuiz>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, id).await?;
    owned_course(&state, &user, quiz.course_id).await?;
    if let Some(title) = &input.title {
        validate_title("Title", title)?;
    }

    let quiz = QuizRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quiz", id }))?;

    Ok(Json(DataResponse { data: quiz }))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn delete_quiz(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let quiz = load_quiz(&state, id).await?;
    owned_course(&state, &user, quiz.course_id).await?;

    QuizRepo::delete(&state.pool, id).await?;
    tracing::info!(quiz_id = id, user_id = user.user_id, "Quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Question authoring
// ---------------------------------------------------------------------------

/// GET /api/v1/quizzes/{id}/questions
///
/// Authoring view, including the correct option keys.
pub async fn list_questions(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, quiz_id).await?;
    owned_course(&state, &user, quiz.course_id).await?;

    let questions = QuizQuestionRepo::list_for_quiz(&state.pool, quiz_id).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /api/v1/quizzes/{id}/questions
///
/// Options are keyed `a`, `b`, `c`, ... in the order given.
pub async fn create_question(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
    Json(input): Json<CreateQuestionRequest>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, quiz_id).await?;
    owned_course(&state, &user, quiz.course_id).await?;

    require_non_empty("Question", &input.prompt)?;
    let (options, correct_option) = keyed_options(&input.options, input.correct_option_index)?;

    let question = QuizQuestionRepo::create(
        &state.pool,
        quiz_id,
        &CreateQuizQuestion {
            prompt: input.prompt,
            options,
            correct_option,
            position: input.position,
        },
    )
    .await?;

    tracing::info!(
        question_id = question.id,
        quiz_id,
        user_id = user.user_id,
        "Quiz question created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/v1/questions/{id}
pub async fn update_question(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuestionRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = load_question(&state, id).await?;
    let quiz = load_quiz(&state, existing.quiz_id).await?;
    owned_course(&state, &user, quiz.course_id).await?;

    if let Some(prompt) = &input.prompt {
        require_non_empty("Question", prompt)?;
    }

    let mut update = UpdateQuizQuestion {
        prompt: input.prompt,
        position: input.position,
        ..Default::default()
    };
    match (input.options, input.correct_option_index) {
        (Some(texts), Some(index)) => {
            let (options, correct) = keyed_options(&texts, index)?;
            update.options = Some(options);
            update.correct_option = Some(correct);
        }
        (Some(_), None) => {
            return Err(AppError::Core(CoreError::Validation(
                "correct_option_index is required when replacing options".into(),
            )));
        }
        (None, Some(index)) => {
            update.correct_option = Some(correct_key_for(&existing.options.0, index)?);
        }
        (None, None) => {}
    }

    let question = QuizQuestionRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuizQuestion",
            id,
        }))?;

    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/v1/questions/{id}
pub async fn delete_question(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let question = load_question(&state, id).await?;
    let quiz = load_quiz(&state, question.quiz_id).await?;
    owned_course(&state, &user, quiz.course_id).await?;

    QuizQuestionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Player and submissions
// ---------------------------------------------------------------------------

/// GET /api/v1/quizzes/{id}
///
/// The quiz with its questions, correct keys removed.
pub async fn get_quiz(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, id).await?;
    accessible_course(&state, &user, quiz.course_id).await?;

    let questions = QuizQuestionRepo::list_for_quiz(&state.pool, id)
        .await?
        .into_iter()
        .map(|q| PlayerQuestion {
            id: q.id,
            prompt: q.prompt,
            options: q.options.0,
            position: q.position,
        })
        .collect();

    Ok(Json(DataResponse {
        data: PlayerQuiz { quiz, questions },
    }))
}

/// POST /api/v1/quizzes/{id}/submissions
///
/// Every question must be answered; an incomplete map is rejected before
/// anything is written. Each attempt is stored as a new row.
pub async fn submit_quiz(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, id).await?;
    accessible_course(&state, &user, quiz.course_id).await?;

    let questions = QuizQuestionRepo::list_for_quiz(&state.pool, id).await?;
    let keys: Vec<_> = questions.iter().map(QuizQuestion::answer_key).collect();
    let outcome = grade(&keys, &input.answers)?;

    let submission = QuizSubmissionRepo::create(
        &state.pool,
        &CreateQuizSubmission {
            quiz_id: id,
            student_id: user.user_id,
            answers: input.answers,
            score: outcome.score,
        },
    )
    .await?;

    tracing::info!(
        submission_id = submission.id,
        quiz_id = id,
        user_id = user.user_id,
        score = outcome.score,
        "Quiz submitted",
    );

    state.event_bus.publish(
        PortalEvent::new(QUIZ_SUBMITTED)
            .with_source("quiz_submission", submission.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "quiz_id": id,
                "course_id": quiz.course_id,
                "score": outcome.score,
                "passed": outcome.passed,
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: graded(submission, &questions),
        }),
    ))
}

/// GET /api/v1/quizzes/{id}/submissions/latest
///
/// The caller's newest attempt with its review, or 404 if none.
pub async fn latest_submission(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = load_quiz(&state, id).await?;
    accessible_course(&state, &user, quiz.course_id).await?;

    let submission = QuizSubmissionRepo::latest_for(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuizSubmission",
            id,
        }))?;
    let questions = QuizQuestionRepo::list_for_quiz(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: graded(submission, &questions),
    }))
}
