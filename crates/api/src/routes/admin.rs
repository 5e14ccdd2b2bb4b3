//! Routes mounted at `/admin`. Every handler requires the admin role,
//! except the course roster which also admits the course instructor.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    analytics, categories, certificates, enrollments, gallery, leadership, magazines, news,
    personnel, pg_programs, profiles, settings, uploads,
};
use crate::state::AppState;

/// Multipart framing allowance on top of the configured file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// ```text
/// GET    /profiles                          -> list_profiles
/// PUT    /profiles/{id}/role                -> update_role
/// PUT    /profiles/{id}/category            -> update_category
/// DELETE /profiles/{id}                     -> delete_profile
///
/// POST   /categories                        -> create_category
/// PUT    /categories/{id}                   -> update_category
/// DELETE /categories/{id}                   -> delete_category
///
/// POST   /enrollments                       -> manual_enroll
/// PUT    /enrollments/{id}/access           -> update_access
/// GET    /courses/{id}/enrollments          -> course_roster
///
/// POST   /certificates                      -> issue_certificate
///
/// GET    /news, /magazines, /personnel      -> drafts and inactive rows included
/// POST   /{content}                         -> create
/// PUT    /{content}/{id}                    -> update
/// DELETE /{content}/{id}                    -> delete
///
/// GET    /settings                          -> list_settings
/// PUT    /settings/{key}                    -> put_setting
///
/// POST   /uploads/{bucket}                  -> upload (multipart)
/// DELETE /uploads/{bucket}/{key}            -> delete_upload
///
/// GET    /analytics                         -> overview
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Accounts.
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles/{id}", delete(profiles::delete_profile))
        .route("/profiles/{id}/role", put(profiles::update_role))
        .route("/profiles/{id}/category", put(profiles::update_category))
        .route("/categories", post(categories::create_category))
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        // Enrollments and certificates.
        .route("/enrollments", post(enrollments::manual_enroll))
        .route("/enrollments/{id}/access", put(enrollments::update_access))
        .route(
            "/courses/{id}/enrollments",
            get(enrollments::course_roster),
        )
        .route("/certificates", post(certificates::issue_certificate))
        // Content.
        .route(
            "/news",
            get(news::admin_list_news).post(news::create_news),
        )
        .route(
            "/news/{id}",
            put(news::update_news).delete(news::delete_news),
        )
        .route(
            "/magazines",
            get(magazines::admin_list_magazines).post(magazines::create_magazine),
        )
        .route(
            "/magazines/{id}",
            put(magazines::update_magazine).delete(magazines::delete_magazine),
        )
        .route(
            "/personnel",
            get(personnel::admin_list_personnel).post(personnel::create_personnel),
        )
        .route(
            "/personnel/{id}",
            put(personnel::update_personnel).delete(personnel::delete_personnel),
        )
        .route("/leadership", post(leadership::create_leader))
        .route(
            "/leadership/{id}",
            put(leadership::update_leader).delete(leadership::delete_leader),
        )
        .route("/pg-programs", post(pg_programs::create_program))
        .route(
            "/pg-programs/{id}",
            put(pg_programs::update_program).delete(pg_programs::delete_program),
        )
        .route("/gallery/videos", post(gallery::create_video))
        .route(
            "/gallery/videos/{id}",
            put(gallery::update_video).delete(gallery::delete_video),
        )
        .route("/gallery/pictures", post(gallery::create_picture))
        .route(
            "/gallery/pictures/{id}",
            put(gallery::update_picture).delete(gallery::delete_picture),
        )
        // Settings.
        .route("/settings", get(settings::list_settings))
        .route("/settings/{key}", put(settings::put_setting))
        // Storage.
        .route(
            "/uploads/{bucket}",
            post(uploads::upload).layer(DefaultBodyLimit::max(
                max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/uploads/{bucket}/{key}", delete(uploads::delete_upload))
        // Analytics.
        .route("/analytics", get(analytics::overview))
}
