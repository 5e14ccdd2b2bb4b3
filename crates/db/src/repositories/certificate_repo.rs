use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::certificate::{Certificate, CreateCertificate};

const COLUMNS: &str =
    "id, student_id, course_id, certificate_no, rendered_html, issued_by, issued_at";

/// At most one certificate exists per (student, course); the unique
/// constraint `uq_certificates_student_course` enforces it.
pub struct CertificateRepo;

impl CertificateRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCertificate,
    ) -> Result<Certificate, sqlx::Error> {
        let query = format!(
            "INSERT INTO certificates
                (student_id, course_id, certificate_no, rendered_html, issued_by, issued_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Certificate>(&query)
            .bind(input.student_id)
            .bind(input.course_id)
            .bind(&input.certificate_no)
            .bind(&input.rendered_html)
            .bind(input.issued_by)
            .bind(input.issued_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Certificate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM certificates WHERE id = $1");
        sqlx::query_as::<_, Certificate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Certificate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM certificates WHERE student_id = $1 ORDER BY issued_at DESC"
        );
        sqlx::query_as::<_, Certificate>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }
}
