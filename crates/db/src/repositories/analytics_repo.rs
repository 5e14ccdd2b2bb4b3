use campus_core::enrollment::{ACCESS_ACTIVE, PAYMENT_STATUS_SUCCEEDED};
use campus_core::roles::{ROLE_INSTRUCTOR, ROLE_STUDENT};
use sqlx::PgPool;

use crate::models::analytics::PortalStats;

/// Aggregate counters for the admin dashboard.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    pub async fn stats(pool: &PgPool) -> Result<PortalStats, sqlx::Error> {
        sqlx::query_as::<_, PortalStats>(
            "SELECT
                (SELECT COUNT(*) FROM profiles WHERE role = $1) AS students,
                (SELECT COUNT(*) FROM profiles WHERE role = $2) AS instructors,
                (SELECT COUNT(*) FROM courses) AS courses,
                (SELECT COUNT(*) FROM enrollments WHERE access_state = $3) AS active_enrollments,
                (SELECT COUNT(*) FROM quiz_submissions) AS quiz_submissions,
                (SELECT AVG(score)::FLOAT8 FROM quiz_submissions) AS average_score,
                (SELECT COALESCE(SUM(amount_minor), 0)::BIGINT FROM payments WHERE status = $4)
                    AS revenue_minor",
        )
        .bind(ROLE_STUDENT)
        .bind(ROLE_INSTRUCTOR)
        .bind(ACCESS_ACTIVE)
        .bind(PAYMENT_STATUS_SUCCEEDED)
        .fetch_one(pool)
        .await
    }
}
