use axum::{middleware, routing::get, Router};

use shared_utils::extractor::session_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .route("/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route(
            "/patient/phone/{phone_number}",
            get(handlers::get_appointments_by_phone),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
