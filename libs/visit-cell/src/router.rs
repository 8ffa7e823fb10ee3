use axum::{
    middleware,
    routing::get,
    Router,
};

use shared_utils::extractor::session_middleware;
use shared_utils::AppState;

use crate::handlers::*;

/// Mounted at `/patients` next to the patient routes.
pub fn visit_routes(state: AppState) -> Router {
    Router::new()
        .route("/{patient_id}/visits", get(list_visits).post(create_visit))
        .route(
            "/{patient_id}/visits/page/{page}/limit/{limit}",
            get(list_visits_page),
        )
        .route(
            "/{patient_id}/visits/{visit_id}",
            get(get_visit).put(update_visit).delete(delete_visit),
        )
        .route(
            "/{patient_id}/visits/{visit_id}/prescriptions",
            get(list_prescriptions).post(create_prescription),
        )
        .route(
            "/{patient_id}/visits/{visit_id}/page/{page}/limit/{limit}",
            get(list_prescriptions_page),
        )
        .route(
            "/{patient_id}/visits/{visit_id}/prescriptions/{prescription_id}",
            get(get_prescription)
                .put(update_prescription)
                .delete(delete_prescription),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
