//! Repository for the `enrollments` table.

use campus_core::enrollment::ACCESS_ACTIVE;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{Enrollment, EnrollmentWithCourse, EnrollmentWithStudent};

const COLUMNS: &str =
    "id, student_id, course_id, payment_status, access_state, enrolled_at, updated_at";

/// Enrollment rows link a student to a course, one row per pair.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The enrollment for a (student, course) pair, if any.
    pub async fn find_for(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the student currently has active access to the course.
    pub async fn has_active_access(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE student_id = $1 AND course_id = $2 AND access_state = $3
             )",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(ACCESS_ACTIVE)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert an active enrollment unless one already exists for the pair.
    ///
    /// Returns `(row, created)`. An existing row is returned untouched.
    pub async fn create_if_absent(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
        payment_status: &str,
    ) -> Result<(Enrollment, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (student_id, course_id, payment_status, access_state)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_enrollments_student_course DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .bind(payment_status)
            .bind(ACCESS_ACTIVE)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(row) => Ok((row, true)),
            None => {
                let existing = Self::find_for(pool, student_id, course_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Change `access_state`. Returns `None` if the enrollment does not exist.
    pub async fn update_access(
        pool: &PgPool,
        id: DbId,
        access_state: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET access_state = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(access_state)
            .fetch_optional(pool)
            .await
    }

    /// Reactivate an enrollment and record how access was obtained.
    pub async fn reinstate(
        pool: &PgPool,
        id: DbId,
        payment_status: &str,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET access_state = $2, payment_status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(ACCESS_ACTIVE)
            .bind(payment_status)
            .fetch_optional(pool)
            .await
    }

    /// A student's enrollments with course titles, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<EnrollmentWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentWithCourse>(
            "SELECT e.id, e.course_id, c.title AS course_title,
                    e.payment_status, e.access_state, e.enrolled_at
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.student_id = $1
             ORDER BY e.enrolled_at DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// The roster of a course with student identity.
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<EnrollmentWithStudent>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentWithStudent>(
            "SELECT e.id, e.student_id, p.full_name AS student_name, p.email AS student_email,
                    e.payment_status, e.access_state, e.enrolled_at
             FROM enrollments e
             JOIN profiles p ON p.id = e.student_id
             WHERE e.course_id = $1
             ORDER BY p.full_name",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Course IDs the student has active access to.
    pub async fn active_course_ids(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT course_id FROM enrollments
             WHERE student_id = $1 AND access_state = $2
             ORDER BY course_id",
        )
        .bind(student_id)
        .bind(ACCESS_ACTIVE)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
