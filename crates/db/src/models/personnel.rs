use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `personnel` table (staff directory).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Personnel {
    pub id: DbId,
    pub full_name: String,
    pub position: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreatePersonnel {
    pub full_name: String,
    pub position: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonnel {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}
