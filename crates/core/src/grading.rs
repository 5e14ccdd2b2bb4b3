//! Quiz grading: option keys, completeness check, scoring and review marks.
//!
//! Correctness is decided by comparing the learner's chosen option *key*
//! against the question's correct key. Keys are short positional labels
//! (`a`, `b`, `c`, ...) assigned when the question is authored, so two
//! options with identical text never collide.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Score};

/// Minimum score (inclusive) for a quiz to count as passed.
pub const PASS_MARK: Score = 70;

/// Minimum options per question.
pub const MIN_OPTIONS: usize = 2;

/// Maximum options per question (one key per letter `a..=j`).
pub const MAX_OPTIONS: usize = 10;

/// Map from question id to the chosen option key.
pub type AnswerMap = HashMap<DbId, String>;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// A single answer option as stored in the `quiz_questions.options` JSONB column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub key: String,
    pub text: String,
}

/// Build keyed options from authored option texts.
///
/// Texts are trimmed. Fails if there are fewer than [`MIN_OPTIONS`] or more
/// than [`MAX_OPTIONS`] options, or if any option is blank.
pub fn build_options(texts: &[String]) -> Result<Vec<QuizOption>, CoreError> {
    if texts.len() < MIN_OPTIONS || texts.len() > MAX_OPTIONS {
        return Err(CoreError::Validation(format!(
            "A question needs between {MIN_OPTIONS} and {MAX_OPTIONS} options, got {}",
            texts.len()
        )));
    }

    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let text = text.trim();
            if text.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Option {} must not be empty",
                    i + 1
                )));
            }
            Ok(QuizOption {
                key: option_key(i),
                text: text.to_string(),
            })
        })
        .collect()
}

/// Resolve the key of the option at `index`, validating the bounds.
pub fn correct_key_for(options: &[QuizOption], index: usize) -> Result<String, CoreError> {
    options.get(index).map(|o| o.key.clone()).ok_or_else(|| {
        CoreError::Validation(format!(
            "correct_option_index {index} is out of range for {} options",
            options.len()
        ))
    })
}

fn option_key(index: usize) -> String {
    char::from(b'a' + index as u8).to_string()
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// The correct answer for one question.
#[derive(Debug, Clone, Copy)]
pub struct AnswerKey<'a> {
    pub question_id: DbId,
    pub correct_option: &'a str,
}

/// Result of grading a complete answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeOutcome {
    pub score: Score,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}

/// Number of questions in `keys` that have an entry in `answers`.
pub fn answered_count(keys: &[AnswerKey<'_>], answers: &AnswerMap) -> usize {
    keys.iter()
        .filter(|k| answers.contains_key(&k.question_id))
        .count()
}

/// Reject the submission unless every question has been answered.
///
/// Keys in `answers` that do not belong to the quiz do not count toward
/// completeness.
pub fn check_complete(keys: &[AnswerKey<'_>], answers: &AnswerMap) -> Result<(), CoreError> {
    if keys.is_empty() {
        return Err(CoreError::Validation("This quiz has no questions yet".into()));
    }
    let answered = answered_count(keys, answers);
    if answered < keys.len() {
        return Err(CoreError::Validation(format!(
            "Please answer all questions ({answered}/{} answered)",
            keys.len()
        )));
    }
    Ok(())
}

/// Percentage of questions answered correctly, rounded half up.
///
/// Returns 0 for an empty question set.
pub fn score(keys: &[AnswerKey<'_>], answers: &AnswerMap) -> Score {
    let total = keys.len();
    if total == 0 {
        return 0;
    }
    let correct = correct_count(keys, answers);
    rounded_percentage(correct, total)
}

/// Validate completeness and compute the full outcome.
pub fn grade(keys: &[AnswerKey<'_>], answers: &AnswerMap) -> Result<GradeOutcome, CoreError> {
    check_complete(keys, answers)?;
    let correct = correct_count(keys, answers);
    let score = rounded_percentage(correct, keys.len());
    Ok(GradeOutcome {
        score,
        correct,
        total: keys.len(),
        passed: score >= PASS_MARK,
    })
}

fn correct_count(keys: &[AnswerKey<'_>], answers: &AnswerMap) -> usize {
    keys.iter()
        .filter(|k| {
            answers
                .get(&k.question_id)
                .is_some_and(|chosen| chosen == k.correct_option)
        })
        .count()
}

/// `round(correct / total * 100)` in integer arithmetic (half rounds up).
fn rounded_percentage(correct: usize, total: usize) -> Score {
    ((correct * 200 + total) / (total * 2)) as Score
}

// ---------------------------------------------------------------------------
// Review marks
// ---------------------------------------------------------------------------

/// How an option is marked after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    /// The correct option (whether or not it was chosen).
    Correct,
    /// The learner chose this option and it is wrong.
    IncorrectSelection,
    Neutral,
}

/// Mark a single option given the correct key and the learner's choice.
pub fn mark_option(option_key: &str, correct_key: &str, selected: Option<&str>) -> OptionMark {
    if option_key == correct_key {
        OptionMark::Correct
    } else if selected == Some(option_key) {
        OptionMark::IncorrectSelection
    } else {
        OptionMark::Neutral
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn keys(pairs: &[(DbId, &'static str)]) -> Vec<AnswerKey<'static>> {
        pairs
            .iter()
            .map(|&(question_id, correct_option)| AnswerKey {
                question_id,
                correct_option,
            })
            .collect()
    }

    fn answers(pairs: &[(DbId, &str)]) -> AnswerMap {
        pairs.iter().map(|&(id, k)| (id, k.to_string())).collect()
    }

    #[test]
    fn three_of_four_scores_75() {
        let k = keys(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        let a = answers(&[(1, "a"), (2, "b"), (3, "c"), (4, "a")]);
        assert_eq!(score(&k, &a), 75);
    }

    #[test]
    fn rounding_is_half_up() {
        // 2/3 = 66.67 -> 67, 1/3 = 33.33 -> 33, 1/8 = 12.5 -> 13
        let k = keys(&[(1, "a"), (2, "a"), (3, "a")]);
        assert_eq!(score(&k, &answers(&[(1, "a"), (2, "a"), (3, "b")])), 67);
        assert_eq!(score(&k, &answers(&[(1, "a"), (2, "b"), (3, "b")])), 33);

        let k8: Vec<_> = (1..=8)
            .map(|id| AnswerKey {
                question_id: id,
                correct_option: "a",
            })
            .collect();
        let mut a8: AnswerMap = (1..=8).map(|id| (id, "b".to_string())).collect();
        a8.insert(1, "a".into());
        assert_eq!(score(&k8, &a8), 13);
    }

    #[test]
    fn incomplete_submission_cites_counts() {
        let k = keys(&[(1, "a"), (2, "a"), (3, "a"), (4, "a"), (5, "a")]);
        let a = answers(&[(1, "a"), (2, "a"), (3, "a"), (4, "a")]);
        let err = grade(&k, &a).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("4/5"));
    }

    #[test]
    fn extra_keys_do_not_satisfy_completeness() {
        let k = keys(&[(1, "a"), (2, "a")]);
        let a = answers(&[(1, "a"), (99, "a")]);
        let err = check_complete(&k, &a).unwrap_err();
        assert!(err.to_string().contains("1/2"));
    }

    #[test]
    fn extra_keys_are_ignored_by_score() {
        let k = keys(&[(1, "a"), (2, "b")]);
        let plain = answers(&[(1, "a"), (2, "c")]);
        let noisy = answers(&[(1, "a"), (2, "c"), (77, "a"), (78, "b")]);
        assert_eq!(score(&k, &plain), score(&k, &noisy));
        assert_eq!(score(&k, &noisy), 50);
    }

    #[test]
    fn score_is_order_invariant() {
        let forward = keys(&[(1, "a"), (2, "b"), (3, "c")]);
        let reversed = keys(&[(3, "c"), (2, "b"), (1, "a")]);
        let a = answers(&[(1, "a"), (2, "x"), (3, "c")]);
        assert_eq!(score(&forward, &a), score(&reversed, &a));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let k = keys(&[(1, "a")]);
        assert_eq!(score(&k, &answers(&[(1, "A")])), 0);
    }

    #[test]
    fn empty_quiz_is_rejected_and_scores_zero() {
        let k: Vec<AnswerKey<'_>> = Vec::new();
        assert_eq!(score(&k, &AnswerMap::new()), 0);
        assert!(grade(&k, &AnswerMap::new()).is_err());
    }

    #[test]
    fn grade_reports_pass_at_mark() {
        let k: Vec<_> = (1..=10)
            .map(|id| AnswerKey {
                question_id: id,
                correct_option: "a",
            })
            .collect();
        let mut a: AnswerMap = (1..=10).map(|id| (id, "a".to_string())).collect();
        a.insert(9, "b".into());
        a.insert(10, "b".into());
        a.insert(8, "b".into());

        let outcome = grade(&k, &a).unwrap();
        assert_eq!(
            outcome,
            GradeOutcome {
                score: 70,
                correct: 7,
                total: 10,
                passed: true,
            }
        );
    }

    #[test]
    fn build_options_assigns_letter_keys() {
        let opts = build_options(&["Lagos".into(), " Abuja ".into(), "Lagos".into()]).unwrap();
        let keys: Vec<_> = opts.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(opts[1].text, "Abuja");
        // Duplicate text is fine: the keys differ.
        assert_ne!(opts[0].key, opts[2].key);
    }

    #[test]
    fn build_options_rejects_bad_shapes() {
        assert!(build_options(&["only one".into()]).is_err());
        assert!(build_options(&["ok".into(), "  ".into()]).is_err());
        let eleven: Vec<String> = (0..11).map(|i| format!("opt {i}")).collect();
        assert!(build_options(&eleven).is_err());
    }

    #[test]
    fn correct_key_bounds_checked() {
        let opts = build_options(&["x".into(), "y".into()]).unwrap();
        assert_eq!(correct_key_for(&opts, 1).unwrap(), "b");
        assert!(correct_key_for(&opts, 2).is_err());
    }

    #[test]
    fn option_marks() {
        assert_eq!(mark_option("a", "a", Some("a")), OptionMark::Correct);
        assert_eq!(mark_option("a", "a", Some("b")), OptionMark::Correct);
        assert_eq!(
            mark_option("b", "a", Some("b")),
            OptionMark::IncorrectSelection
        );
        assert_eq!(mark_option("c", "a", Some("b")), OptionMark::Neutral);
        assert_eq!(mark_option("c", "a", None), OptionMark::Neutral);
    }
}
