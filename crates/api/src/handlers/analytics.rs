//! Admin analytics overview.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use campus_db::models::activity::ActivityEntry;
use campus_db::models::analytics::PortalStats;
use campus_db::repositories::{ActivityRepo, AnalyticsRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of activity entries shown with the counters.
const RECENT_ACTIVITY_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct AnalyticsOverview {
    #[serde(flatten)]
    pub stats: PortalStats,
    pub recent_activity: Vec<ActivityEntry>,
}

/// GET /api/v1/admin/analytics
pub async fn overview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = AnalyticsRepo::stats(&state.pool).await?;
    let recent_activity = ActivityRepo::recent(&state.pool, RECENT_ACTIVITY_LIMIT).await?;

    Ok(Json(DataResponse {
        data: AnalyticsOverview {
            stats,
            recent_activity,
        },
    }))
}
