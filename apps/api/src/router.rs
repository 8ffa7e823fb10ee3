use std::any::Any;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;

use appointment_cell::appointment_routes;
use dashboard_cell::dashboard_routes;
use doctor_cell::doctor_routes;
use medication_cell::medication_routes;
use patient_cell::patient_routes;
use shared_models::error::AppError;
use shared_utils::AppState;
use visit_cell::visit_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Front desk API is running!" }))
        .route("/health", get(health).with_state(state.clone()))
        .nest(
            "/patients",
            patient_routes(state.clone()).merge(visit_routes(state.clone())),
        )
        .nest("/medications", medication_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
        .layer(CatchPanicLayer::custom(panic_response))
}

/// A panicking handler answers with the usual 500 body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(detail).into_response()
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let uptime = (Utc::now() - state.started_at).num_seconds().max(0);
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSeconds": uptime
    }))
}
