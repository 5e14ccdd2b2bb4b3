//! Chronicle-of-command entries.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leadership` table. Tenure bounds are calendar years.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Leader {
    pub id: DbId,
    pub full_name: String,
    pub rank: Option<String>,
    pub title: String,
    pub tenure_start: Option<i32>,
    pub tenure_end: Option<i32>,
    pub biography: Option<String>,
    pub photo_url: Option<String>,
    pub is_current: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateLeader {
    pub full_name: String,
    pub rank: Option<String>,
    pub title: String,
    pub tenure_start: Option<i32>,
    pub tenure_end: Option<i32>,
    pub biography: Option<String>,
    pub photo_url: Option<String>,
    pub is_current: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeader {
    pub full_name: Option<String>,
    pub rank: Option<String>,
    pub title: Option<String>,
    pub tenure_start: Option<i32>,
    pub tenure_end: Option<i32>,
    pub biography: Option<String>,
    pub photo_url: Option<String>,
    pub is_current: Option<bool>,
    pub display_order: Option<i32>,
}
