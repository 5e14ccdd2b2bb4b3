//! Per-course quiz progress for the learner dashboard.
//!
//! A quiz counts as passed when the learner's best score across all of
//! their attempts reaches [`PASS_MARK`]. Aggregation is a pure function
//! of its inputs and is recomputed from scratch on every request.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::grading::PASS_MARK;
use crate::types::{DbId, Score};

/// A quiz and the course it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRef {
    pub quiz_id: DbId,
    pub course_id: DbId,
}

/// One recorded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    pub quiz_id: DbId,
    pub score: Score,
}

/// `passed / total` quizzes for one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    pub passed: usize,
    pub total: usize,
}

/// Best score per quiz across all attempts.
pub fn best_score_by_quiz(submissions: &[ScoreRecord]) -> HashMap<DbId, Score> {
    let mut best: HashMap<DbId, Score> = HashMap::new();
    for s in submissions {
        best.entry(s.quiz_id)
            .and_modify(|b| *b = (*b).max(s.score))
            .or_insert(s.score);
    }
    best
}

/// Aggregate quiz progress per enrolled course.
///
/// Every id in `course_ids` appears in the output, so a course with no
/// quizzes reports `0/0`. Quizzes outside the enrolled set, and attempts on
/// quizzes outside the quiz set, are ignored.
pub fn course_progress(
    course_ids: &[DbId],
    quizzes: &[QuizRef],
    submissions: &[ScoreRecord],
) -> BTreeMap<DbId, CourseProgress> {
    let mut progress: BTreeMap<DbId, CourseProgress> = course_ids
        .iter()
        .map(|&id| (id, CourseProgress::default()))
        .collect();

    let known_quizzes: HashSet<DbId> = quizzes.iter().map(|q| q.quiz_id).collect();
    let relevant: Vec<ScoreRecord> = submissions
        .iter()
        .copied()
        .filter(|s| known_quizzes.contains(&s.quiz_id))
        .collect();
    let best = best_score_by_quiz(&relevant);

    for quiz in quizzes {
        let Some(entry) = progress.get_mut(&quiz.course_id) else {
            continue;
        };
        entry.total += 1;
        if best.get(&quiz.quiz_id).is_some_and(|&b| b >= PASS_MARK) {
            entry.passed += 1;
        }
    }

    progress
}
