//! Course entity model and DTOs.

use campus_core::types::{DbId, MinorUnits, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_paid: bool,
    pub price_minor: Option<MinorUnits>,
    pub currency: String,
    pub is_published: bool,
    pub instructor_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. The instructor is taken from the caller.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    pub price_minor: Option<MinorUnits>,
    pub currency: Option<String>,
    pub is_published: Option<bool>,
}

/// DTO for updating a course. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_paid: Option<bool>,
    pub price_minor: Option<MinorUnits>,
    pub currency: Option<String>,
    pub is_published: Option<bool>,
}
