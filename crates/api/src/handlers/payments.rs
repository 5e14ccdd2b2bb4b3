//! Payment checkout and gateway webhook handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use campus_core::enrollment::{
    payment_reference, ACCESS_ACTIVE, EVENT_CHARGE_SUCCESS, PAYMENT_PAID,
};
use campus_core::error::CoreError;
use campus_core::signature::{verify_signature, SIGNATURE_HEADER};
use campus_core::types::{DbId, MinorUnits};
use campus_db::models::payment::{CreatePayment, Payment};
use campus_db::repositories::{EnrollmentRepo, PaymentRepo, ProfileRepo};
use campus_events::bus::PAYMENT_SUCCEEDED;
use campus_events::PortalEvent;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::access::load_course;
use super::enrollments::publish_created;
use crate::error::{AppError, AppResult};
use crate::gateway::InitializeRequest;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InitializePaymentRequest {
    pub course_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub reference: String,
    pub authorization_url: String,
    pub access_code: Option<String>,
    pub amount_minor: MinorUnits,
    pub currency: String,
}

/// The subset of a webhook body the portal reads.
#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// POST /api/v1/payments/initialize
///
/// Opens a hosted checkout for a paid course and records a pending payment.
pub async fn initialize(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<InitializePaymentRequest>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state, input.course_id).await?;
    if !course.is_published {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course.id,
        }));
    }
    let amount = match (course.is_paid, course.price_minor) {
        (true, Some(price)) if price > 0 => price,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "This course is free; enroll directly".into(),
            )))
        }
    };

    if EnrollmentRepo::has_active_access(&state.pool, user.user_id, course.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You are already enrolled in this course".into(),
        )));
    }

    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;

    let reference = payment_reference(course.id, user.user_id);
    let checkout = state
        .gateway
        .initialize(&InitializeRequest {
            email: profile.email,
            amount,
            currency: course.currency.clone(),
            reference: reference.clone(),
            callback_url: state.config.payment.callback_url.clone(),
        })
        .await?;

    let payment = PaymentRepo::create(
        &state.pool,
        &CreatePayment {
            user_id: user.user_id,
            course_id: course.id,
            reference,
            amount_minor: amount,
            currency: course.currency,
            authorization_url: Some(checkout.authorization_url.clone()),
        },
    )
    .await?;

    tracing::info!(
        payment_id = payment.id,
        reference = %payment.reference,
        course_id = payment.course_id,
        user_id = user.user_id,
        "Payment initialized",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckoutResponse {
                reference: payment.reference,
                authorization_url: checkout.authorization_url,
                access_code: checkout.access_code,
                amount_minor: payment.amount_minor,
                currency: payment.currency,
            },
        }),
    ))
}

/// POST /api/v1/payments/webhook
///
/// The raw body must carry a valid `x-gateway-signature`. A `charge.success`
/// whose amount and currency match the record settles the pending payment
/// and enrolls the payer, reactivating a revoked enrollment. A replay
/// settles nothing twice but still makes sure the enrollment exists. Other
/// events are acknowledged and ignored.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing webhook signature".into()))
        })?;

    if !verify_signature(&state.config.payment.gateway_secret, &body, signature) {
        tracing::warn!("Rejected webhook with invalid signature");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook body: {e}")))?;

    if event.event != EVENT_CHARGE_SUCCESS {
        tracing::debug!(event = %event.event, "Ignoring webhook event");
        return Ok(Json(json!({ "received": true })));
    }

    let reference = event
        .data
        .get("reference")
        .and_then(|r| r.as_str())
        .ok_or_else(|| AppError::BadRequest("Webhook data.reference is missing".into()))?;

    let Some(payment) = PaymentRepo::find_by_reference(&state.pool, reference).await? else {
        tracing::warn!(reference, "Webhook for unknown payment reference");
        return Err(AppError::Database(sqlx::Error::RowNotFound));
    };

    if !charge_matches(&payment, &event.data) {
        tracing::warn!(
            reference,
            expected_amount = payment.amount_minor,
            expected_currency = %payment.currency,
            "Webhook charge does not match the recorded payment",
        );
        return Err(AppError::BadRequest(
            "Charge amount or currency does not match the payment".into(),
        ));
    }

    let settled = PaymentRepo::mark_succeeded(&state.pool, reference, &event.data).await?;
    if let Some(settled) = &settled {
        tracing::info!(
            payment_id = settled.id,
            reference,
            amount_minor = settled.amount_minor,
            "Payment succeeded",
        );
        state.event_bus.publish(
            PortalEvent::new(PAYMENT_SUCCEEDED)
                .with_source("payment", settled.id)
                .with_actor(settled.user_id)
                .with_payload(json!({
                    "reference": settled.reference,
                    "course_id": settled.course_id,
                    "amount_minor": settled.amount_minor,
                    "currency": settled.currency,
                })),
        );
    }

    let (enrollment, created) = EnrollmentRepo::create_if_absent(
        &state.pool,
        payment.user_id,
        payment.course_id,
        PAYMENT_PAID,
    )
    .await?;
    if created {
        publish_created(&state, &enrollment, payment.user_id);
    } else if settled.is_some() && enrollment.access_state != ACCESS_ACTIVE {
        EnrollmentRepo::reinstate(&state.pool, enrollment.id, PAYMENT_PAID).await?;
        tracing::info!(
            enrollment_id = enrollment.id,
            reference,
            "Enrollment reactivated by payment",
        );
    }

    Ok(Json(json!({ "received": true })))
}

/// The charged amount must equal the recorded one. A currency, when the
/// gateway reports it, must match too.
fn charge_matches(payment: &Payment, data: &serde_json::Value) -> bool {
    let amount_ok = data.get("amount").and_then(|a| a.as_i64()) == Some(payment.amount_minor);
    let currency_ok = match data.get("currency").and_then(|c| c.as_str()) {
        Some(currency) => currency.eq_ignore_ascii_case(&payment.currency),
        None => true,
    };
    amount_ok && currency_ok
}
