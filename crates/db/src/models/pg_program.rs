use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pg_programs` table (postgraduate programmes).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PgProgram {
    pub id: DbId,
    pub name: String,
    pub department: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub is_open: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreatePgProgram {
    pub name: String,
    pub department: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub is_open: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePgProgram {
    pub name: Option<String>,
    pub department: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub is_open: Option<bool>,
    pub display_order: Option<i32>,
}
