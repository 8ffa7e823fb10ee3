use axum::{middleware, routing::get, Router};

use shared_utils::extractor::session_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(handlers::get_stats))
        .route("/activity", get(handlers::get_recent_activity))
        .route("/upcoming-visits", get(handlers::get_upcoming_visits))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
