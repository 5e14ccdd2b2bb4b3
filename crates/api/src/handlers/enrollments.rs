//! Handlers for course enrollments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::enrollment::{validate_access_state, ACCESS_ACTIVE, PAYMENT_FREE, PAYMENT_WAIVED};
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::enrollment::Enrollment;
use campus_db::repositories::{EnrollmentRepo, ProfileRepo};
use campus_events::bus::ENROLLMENT_CREATED;
use campus_events::PortalEvent;
use serde::Deserialize;

use super::access::{load_course, owned_course};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireInstructor};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ManualEnrollRequest {
    pub student_id: DbId,
    pub course_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccessRequest {
    pub access_state: String,
}

/// Publish `enrollment.created` for a freshly inserted row.
pub fn publish_created(state: &AppState, enrollment: &Enrollment, actor: DbId) {
    state.event_bus.publish(
        PortalEvent::new(ENROLLMENT_CREATED)
            .with_source("enrollment", enrollment.id)
            .with_actor(actor)
            .with_payload(serde_json::json!({
                "student_id": enrollment.student_id,
                "course_id": enrollment.course_id,
                "payment_status": enrollment.payment_status,
            })),
    );
}

/// POST /api/v1/courses/{id}/enroll
///
/// Free courses only. Enrolling twice returns the existing row with 200.
pub async fn enroll(
    user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = load_course(&state, course_id).await?;
    if course.is_paid {
        return Err(AppError::Core(CoreError::Validation(
            "This course is paid; complete checkout to enroll".into(),
        )));
    }
    if !course.is_published {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }));
    }

    let (enrollment, created) =
        EnrollmentRepo::create_if_absent(&state.pool, user.user_id, course_id, PAYMENT_FREE)
            .await?;

    let status = if created {
        tracing::info!(
            enrollment_id = enrollment.id,
            course_id,
            user_id = user.user_id,
            "Enrollment created",
        );
        publish_created(&state, &enrollment, user.user_id);
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(DataResponse { data: enrollment })))
}

/// GET /api/v1/enrollments/me
pub async fn my_enrollments(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let enrollments = EnrollmentRepo::list_for_student(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

/// POST /api/v1/admin/enrollments
///
/// Grant access without payment (`waived`). A revoked enrollment is
/// reactivated.
pub async fn manual_enroll(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ManualEnrollRequest>,
) -> AppResult<impl IntoResponse> {
    ProfileRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: input.student_id,
        }))?;
    load_course(&state, input.course_id).await?;

    let (mut enrollment, created) = EnrollmentRepo::create_if_absent(
        &state.pool,
        input.student_id,
        input.course_id,
        PAYMENT_WAIVED,
    )
    .await?;

    if created {
        publish_created(&state, &enrollment, admin.user_id);
    } else if enrollment.access_state != ACCESS_ACTIVE {
        enrollment = EnrollmentRepo::update_access(&state.pool, enrollment.id, ACCESS_ACTIVE)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment",
                id: enrollment.id,
            }))?;
    }

    tracing::info!(
        enrollment_id = enrollment.id,
        student_id = input.student_id,
        course_id = input.course_id,
        admin_id = admin.user_id,
        created,
        "Manual enrollment granted",
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: enrollment })))
}

/// PUT /api/v1/admin/enrollments/{id}/access
pub async fn update_access(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccessRequest>,
) -> AppResult<impl IntoResponse> {
    validate_access_state(&input.access_state)?;

    let enrollment = EnrollmentRepo::update_access(&state.pool, id, &input.access_state)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id,
        }))?;

    tracing::info!(
        enrollment_id = id,
        access_state = %input.access_state,
        admin_id = admin.user_id,
        "Enrollment access updated",
    );

    Ok(Json(DataResponse { data: enrollment }))
}

/// GET /api/v1/admin/courses/{id}/enrollments
///
/// Course roster. Instructors may read the roster of their own courses.
pub async fn course_roster(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_course(&state, &user, course_id).await?;
    let roster = EnrollmentRepo::list_for_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: roster }))
}
