//! Payment entity model.

use campus_core::types::{DbId, MinorUnits, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub reference: String,
    pub amount_minor: MinorUnits,
    pub currency: String,
    pub status: String,
    pub authorization_url: Option<String>,
    pub gateway_payload: Option<serde_json::Value>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a pending payment after checkout initialization.
#[derive(Debug)]
pub struct CreatePayment {
    pub user_id: DbId,
    pub course_id: DbId,
    pub reference: String,
    pub amount_minor: MinorUnits,
    pub currency: String,
    pub authorization_url: Option<String>,
}
