//! Classification of database errors and the retrying wrapper.
//!
//! Repositories return plain `sqlx::Error`; callers that need to react to
//! a specific failure mode ask [`classify`] instead of string-matching
//! messages at every call site.

use std::future::Future;

use campus_core::retry::{retry_async, RetryPolicy};

/// PostgreSQL `undefined_table`.
pub const PG_UNDEFINED_TABLE: &str = "42P01";
/// PostgreSQL `undefined_column`.
pub const PG_UNDEFINED_COLUMN: &str = "42703";
/// PostgreSQL `unique_violation`.
pub const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL `check_violation`.
pub const PG_CHECK_VIOLATION: &str = "23514";

/// Coarse error categories the API layer maps to HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The relation or column is not (yet) visible: a migration or a schema
    /// cache that has not caught up. Safe to retry.
    NotYetAvailable,
    NotFound,
    UniqueViolation,
    ForeignKeyViolation,
    CheckViolation,
    Other,
}

/// Classify a sqlx error.
pub fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::Database(db_err) => {
            classify_parts(db_err.code().as_deref(), db_err.message())
        }
        _ => ErrorKind::Other,
    }
}

/// Classify from an SQLSTATE code and message.
pub fn classify_parts(code: Option<&str>, message: &str) -> ErrorKind {
    match code {
        Some(PG_UNDEFINED_TABLE) | Some(PG_UNDEFINED_COLUMN) => ErrorKind::NotYetAvailable,
        Some(PG_UNIQUE_VIOLATION) => ErrorKind::UniqueViolation,
        Some(PG_FOREIGN_KEY_VIOLATION) => ErrorKind::ForeignKeyViolation,
        Some(PG_CHECK_VIOLATION) => ErrorKind::CheckViolation,
        _ => {
            let lower = message.to_ascii_lowercase();
            let relation_missing =
                lower.contains("relation") && lower.contains("does not exist");
            if lower.contains("schema cache") || relation_missing {
                ErrorKind::NotYetAvailable
            } else {
                ErrorKind::Other
            }
        }
    }
}

/// Whether the error is worth retrying under [`with_retry`].
pub fn is_not_yet_available(err: &sqlx::Error) -> bool {
    classify(err) == ErrorKind::NotYetAvailable
}

/// Run a query under the default retry policy, retrying only
/// [`ErrorKind::NotYetAvailable`] failures.
pub async fn with_retry<T, F, Fut>(op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    retry_async(&RetryPolicy::default(), is_not_yet_available, op).await
}
