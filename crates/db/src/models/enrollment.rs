//! Enrollment entity model and joined read models.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub payment_status: String,
    pub access_state: String,
    pub enrolled_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Enrollment joined with its course title, for the learner's course list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentWithCourse {
    pub id: DbId,
    pub course_id: DbId,
    pub course_title: String,
    pub payment_status: String,
    pub access_state: String,
    pub enrolled_at: Timestamp,
}

/// Enrollment joined with the student's identity, for admin course rosters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrollmentWithStudent {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub student_email: String,
    pub payment_status: String,
    pub access_state: String,
    pub enrolled_at: Timestamp,
}
