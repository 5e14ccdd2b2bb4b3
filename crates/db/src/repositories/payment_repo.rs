//! Repository for the `payments` table.

use campus_core::enrollment::{PAYMENT_STATUS_PENDING, PAYMENT_STATUS_SUCCEEDED};
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};

const COLUMNS: &str = "id, user_id, course_id, reference, amount_minor, currency, status, \
                        authorization_url, gateway_payload, paid_at, created_at, updated_at";

pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a pending payment.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments
                (user_id, course_id, reference, amount_minor, currency, status, authorization_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(&input.reference)
            .bind(input.amount_minor)
            .bind(&input.currency)
            .bind(PAYMENT_STATUS_PENDING)
            .bind(&input.authorization_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE reference = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// Transition a pending payment to succeeded, storing the gateway payload.
    ///
    /// Returns `None` when the payment is unknown or already settled, so a
    /// replayed webhook does not settle twice.
    pub async fn mark_succeeded(
        pool: &PgPool,
        reference: &str,
        payload: &serde_json::Value,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                status = $2,
                gateway_payload = $3,
                paid_at = NOW()
             WHERE reference = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(reference)
            .bind(PAYMENT_STATUS_SUCCEEDED)
            .bind(payload)
            .bind(PAYMENT_STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }
}
