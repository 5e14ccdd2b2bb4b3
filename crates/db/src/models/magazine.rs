//! E-magazine issue model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `magazines` table. `pdf_url` points into the documents bucket.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Magazine {
    pub id: DbId,
    pub title: String,
    pub issue_label: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub pdf_url: String,
    pub is_published: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMagazine {
    pub title: String,
    pub issue_label: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub pdf_url: String,
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMagazine {
    pub title: Option<String>,
    pub issue_label: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}
