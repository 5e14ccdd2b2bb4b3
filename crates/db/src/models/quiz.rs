//! Quiz, question and submission models.

use campus_core::grading::{AnswerKey, AnswerMap, QuizOption};
use campus_core::progress::{QuizRef, ScoreRecord};
use campus_core::types::{DbId, Score, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quiz {
    pub fn to_quiz_ref(&self) -> QuizRef {
        QuizRef {
            quiz_id: self.id,
            course_id: self.course_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
    pub description: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuiz {
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

/// A row from the `quiz_questions` table, including the correct option key.
///
/// Serializing this exposes the answer; the player view strips it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub quiz_id: DbId,
    pub prompt: String,
    pub options: Json<Vec<QuizOption>>,
    pub correct_option: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QuizQuestion {
    pub fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey {
            question_id: self.id,
            correct_option: &self.correct_option,
        }
    }
}

/// Insert DTO with options already keyed by the grading module.
///
/// Without a `position` the question goes after the quiz's last one.
#[derive(Debug)]
pub struct CreateQuizQuestion {
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct_option: String,
    pub position: Option<i32>,
}

/// Patch DTO. `options` and `correct_option` are replaced together.
#[derive(Debug, Default)]
pub struct UpdateQuizQuestion {
    pub prompt: Option<String>,
    pub options: Option<Vec<QuizOption>>,
    pub correct_option: Option<String>,
    pub position: Option<i32>,
}

/// A row from the `quiz_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizSubmission {
    pub id: DbId,
    pub quiz_id: DbId,
    pub student_id: DbId,
    pub answers: Json<AnswerMap>,
    pub score: Score,
    pub submitted_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateQuizSubmission {
    pub quiz_id: DbId,
    pub student_id: DbId,
    pub answers: AnswerMap,
    pub score: Score,
}

/// The `(quiz_id, score)` projection used by progress aggregation.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct SubmissionScore {
    pub quiz_id: DbId,
    pub score: Score,
}

impl From<SubmissionScore> for ScoreRecord {
    fn from(s: SubmissionScore) -> Self {
        ScoreRecord {
            quiz_id: s.quiz_id,
            score: s.score,
        }
    }
}
