//! Shared query parameter types for API handlers.

use campus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// `(limit, offset)` clamped to the portal-wide bounds.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(self.offset),
        )
    }
}

/// `GET /courses` filters.
#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /admin/profiles` filters.
#[derive(Debug, Deserialize)]
pub struct ProfileListParams {
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
