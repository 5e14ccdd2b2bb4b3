//! Profile (user account) entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub category_id: Option<DbId>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub category_id: Option<DbId>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            email: p.email.clone(),
            full_name: p.full_name.clone(),
            role: p.role.clone(),
            category_id: p.category_id,
            avatar_url: p.avatar_url.clone(),
            is_active: p.is_active,
            last_login_at: p.last_login_at,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub category_id: Option<DbId>,
}
