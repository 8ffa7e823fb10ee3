use axum::{extract::State, Json};
use chrono::Utc;
use tracing::debug;

use shared_models::activity::ActivityEntry;
use shared_models::error::AppError;
use shared_utils::extractor::QueryParams;
use shared_utils::AppState;

use crate::models::{DashboardStats, UpcomingVisit, WidgetQuery};

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.store.stats().await.into())
}

#[axum::debug_handler]
pub async fn get_recent_activity(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WidgetQuery>,
) -> Result<Json<Vec<ActivityEntry>>, AppError> {
    let limit = query.resolve(state.config.max_page_limit)?;
    Ok(Json(state.store.recent_activity(limit).await))
}

#[axum::debug_handler]
pub async fn get_upcoming_visits(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WidgetQuery>,
) -> Result<Json<Vec<UpcomingVisit>>, AppError> {
    let limit = query.resolve(state.config.max_page_limit)?;
    let visits = state.store.upcoming_visits(Utc::now(), limit).await?;
    debug!("{} upcoming visits", visits.len());

    Ok(Json(visits.into_iter().map(UpcomingVisit::from).collect()))
}
