//! Routes for a signed-in learner: enrollments, progress, payments and
//! certificates.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{certificates, dashboard, enrollments, payments};
use crate::state::AppState;

/// Mounted at `/enrollments`.
pub fn enrollment_router() -> Router<AppState> {
    Router::new().route("/me", get(enrollments::my_enrollments))
}

/// Mounted at `/dashboard`.
pub fn dashboard_router() -> Router<AppState> {
    Router::new().route("/progress", get(dashboard::progress))
}

/// Mounted at `/payments`. The webhook is authenticated by its signature.
pub fn payment_router() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(payments::initialize))
        .route("/webhook", post(payments::webhook))
}

/// Mounted at `/certificates`.
pub fn certificate_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(certificates::my_certificates))
        .route("/{id}", get(certificates::get_certificate))
}
