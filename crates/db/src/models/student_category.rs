use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `student_categories` table (e.g. "Regular", "Part-time").
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}
