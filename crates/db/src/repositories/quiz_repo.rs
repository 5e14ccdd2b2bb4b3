//! Repositories for quizzes, their questions and student submissions.

use campus_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::quiz::{
    CreateQuiz, CreateQuizQuestion, CreateQuizSubmission, Quiz, QuizQuestion, QuizSubmission,
    SubmissionScore, UpdateQuiz, UpdateQuizQuestion,
};

const QUIZ_COLUMNS: &str = "id, course_id, title, description, position, created_at, updated_at";

const QUESTION_COLUMNS: &str =
    "id, quiz_id, prompt, options, correct_option, position, created_at, updated_at";

const SUBMISSION_COLUMNS: &str = "id, quiz_id, student_id, answers, score, submitted_at";

pub struct QuizRepo;

impl QuizRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE course_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Every quiz belonging to any of the given courses.
    pub async fn list_for_courses(
        pool: &PgPool,
        course_ids: &[DbId],
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE course_id = ANY($1) ORDER BY course_id, position, id"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(course_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateQuiz,
    ) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes (course_id, title, description, position)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {QUIZ_COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(course_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuiz,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!(
            "UPDATE quizzes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                position = COALESCE($4, position)
             WHERE id = $1
             RETURNING {QUIZ_COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct QuizQuestionRepo;

impl QuizQuestionRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!("SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE id = $1");
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Questions of a quiz in display order.
    pub async fn list_for_quiz(
        pool: &PgPool,
        quiz_id: DbId,
    ) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE quiz_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        quiz_id: DbId,
        input: &CreateQuizQuestion,
    ) -> Result<QuizQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions (quiz_id, prompt, options, correct_option, position)
             VALUES ($1, $2, $3, $4, COALESCE($5, (
                 SELECT COALESCE(MAX(position) + 1, 0) FROM quiz_questions WHERE quiz_id = $1
             )))
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(quiz_id)
            .bind(input.prompt.trim())
            .bind(Json(&input.options))
            .bind(&input.correct_option)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuizQuestion,
    ) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_questions SET
                prompt = COALESCE($2, prompt),
                options = COALESCE($3, options),
                correct_option = COALESCE($4, correct_option),
                position = COALESCE($5, position)
             WHERE id = $1
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .bind(input.prompt.as_deref().map(str::trim))
            .bind(input.options.as_ref().map(Json))
            .bind(&input.correct_option)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Submissions are append-only: every attempt is a new row.
pub struct QuizSubmissionRepo;

impl QuizSubmissionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuizSubmission,
    ) -> Result<QuizSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_submissions (quiz_id, student_id, answers, score)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, QuizSubmission>(&query)
            .bind(input.quiz_id)
            .bind(input.student_id)
            .bind(Json(&input.answers))
            .bind(input.score)
            .fetch_one(pool)
            .await
    }

    /// The student's most recent attempt on a quiz.
    pub async fn latest_for(
        pool: &PgPool,
        quiz_id: DbId,
        student_id: DbId,
    ) -> Result<Option<QuizSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM quiz_submissions
             WHERE quiz_id = $1 AND student_id = $2
             ORDER BY submitted_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, QuizSubmission>(&query)
            .bind(quiz_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// All `(quiz_id, score)` pairs the student has recorded on the given quizzes.
    pub async fn scores_for_student(
        pool: &PgPool,
        student_id: DbId,
        quiz_ids: &[DbId],
    ) -> Result<Vec<SubmissionScore>, sqlx::Error> {
        sqlx::query_as::<_, SubmissionScore>(
            "SELECT quiz_id, score FROM quiz_submissions
             WHERE student_id = $1 AND quiz_id = ANY($2)",
        )
        .bind(student_id)
        .bind(quiz_ids)
        .fetch_all(pool)
        .await
    }
}
