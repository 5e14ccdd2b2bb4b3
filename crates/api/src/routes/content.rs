//! Public read routes for portal content and site settings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{
    categories, gallery, leadership, magazines, news, personnel, pg_programs, settings,
};
use crate::state::AppState;

/// Public content routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /news, /news/{id}
/// GET /magazines, /magazines/{id}
/// GET /personnel, /personnel/{id}
/// GET /leadership, /leadership/{id}
/// GET /pg-programs, /pg-programs/{id}
/// GET /gallery/videos, /gallery/videos/{id}
/// GET /gallery/pictures, /gallery/pictures/{id}
/// GET /categories
/// GET /settings/{key}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(news::list_news))
        .route("/news/{id}", get(news::get_news))
        .route("/magazines", get(magazines::list_magazines))
        .route("/magazines/{id}", get(magazines::get_magazine))
        .route("/personnel", get(personnel::list_personnel))
        .route("/personnel/{id}", get(personnel::get_personnel))
        .route("/leadership", get(leadership::list_leaders))
        .route("/leadership/{id}", get(leadership::get_leader))
        .route("/pg-programs", get(pg_programs::list_programs))
        .route("/pg-programs/{id}", get(pg_programs::get_program))
        .route("/gallery/videos", get(gallery::list_videos))
        .route("/gallery/videos/{id}", get(gallery::get_video))
        .route("/gallery/pictures", get(gallery::list_pictures))
        .route("/gallery/pictures/{id}", get(gallery::get_picture))
        .route("/categories", get(categories::list_categories))
        .route("/settings/{key}", get(settings::get_setting))
}
