//! Certificate issuing and lookup handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::certificate::{
    certificate_number, render_template, CertificateFields, DEFAULT_TEMPLATE,
    TEMPLATE_SETTING_KEY,
};
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::certificate::CreateCertificate;
use campus_db::repositories::{CertificateRepo, EnrollmentRepo, ProfileRepo, SettingRepo};
use campus_events::bus::CERTIFICATE_ISSUED;
use campus_events::PortalEvent;
use chrono::Utc;
use serde::Deserialize;

use super::access::load_course;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IssueCertificateRequest {
    pub student_id: DbId,
    pub course_id: DbId,
}

/// The configured template text, or the built-in one.
///
/// The setting holds either a JSON string or `{"html": "..."}`.
async fn load_template(state: &AppState) -> AppResult<String> {
    let setting = SettingRepo::get(&state.pool, TEMPLATE_SETTING_KEY).await?;
    let template = setting.and_then(|s| match s.value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Object(map) => map
            .get("html")
            .and_then(|v| v.as_str())
            .map(str::to_owned),
        _ => None,
    });
    Ok(template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()))
}

/// POST /api/v1/admin/certificates
///
/// The student needs an active enrollment. A second certificate for the
/// same course is rejected with 409.
pub async fn issue_certificate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<IssueCertificateRequest>,
) -> AppResult<impl IntoResponse> {
    let student = ProfileRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: input.student_id,
        }))?;
    let course = load_course(&state, input.course_id).await?;

    if !EnrollmentRepo::has_active_access(&state.pool, student.id, course.id).await? {
        return Err(AppError::Core(CoreError::Validation(
            "The student has no active enrollment in this course".into(),
        )));
    }

    let issued_at = Utc::now();
    let certificate_no = certificate_number(course.id, student.id, issued_at);
    let template = load_template(&state).await?;
    let rendered_html = render_template(
        &template,
        &CertificateFields {
            student_name: &student.full_name,
            course_title: &course.title,
            issued_on: issued_at,
            certificate_no: &certificate_no,
        },
    );

    let certificate = CertificateRepo::create(
        &state.pool,
        &CreateCertificate {
            student_id: student.id,
            course_id: course.id,
            certificate_no,
            rendered_html,
            issued_by: admin.user_id,
            issued_at,
        },
    )
    .await?;

    tracing::info!(
        certificate_id = certificate.id,
        certificate_no = %certificate.certificate_no,
        student_id = student.id,
        course_id = course.id,
        admin_id = admin.user_id,
        "Certificate issued",
    );

    state.event_bus.publish(
        PortalEvent::new(CERTIFICATE_ISSUED)
            .with_source("certificate", certificate.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "student_id": student.id,
                "course_id": course.id,
                "certificate_no": certificate.certificate_no,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: certificate })))
}

/// GET /api/v1/certificates/me
pub async fn my_certificates(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let certificates = CertificateRepo::list_for_student(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: certificates }))
}

/// GET /api/v1/certificates/{id}
///
/// Visible to its holder and to admins.
pub async fn get_certificate(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let certificate = CertificateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Certificate",
            id,
        }))?;

    if certificate.student_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "This certificate belongs to another student".into(),
        )));
    }

    Ok(Json(DataResponse { data: certificate }))
}
