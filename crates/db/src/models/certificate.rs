use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `certificates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Certificate {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub certificate_no: String,
    pub rendered_html: String,
    pub issued_by: Option<DbId>,
    pub issued_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateCertificate {
    pub student_id: DbId,
    pub course_id: DbId,
    pub certificate_no: String,
    pub rendered_html: String,
    pub issued_by: DbId,
    pub issued_at: Timestamp,
}
