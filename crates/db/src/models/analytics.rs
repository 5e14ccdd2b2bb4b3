//! Read models for the admin analytics view.

use campus_core::types::MinorUnits;
use serde::Serialize;
use sqlx::FromRow;

/// Platform-wide counters computed in a single query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortalStats {
    pub students: i64,
    pub instructors: i64,
    pub courses: i64,
    pub active_enrollments: i64,
    pub quiz_submissions: i64,
    /// Mean submission score, `None` when nothing has been submitted.
    pub average_score: Option<f64>,
    pub revenue_minor: MinorUnits,
}
