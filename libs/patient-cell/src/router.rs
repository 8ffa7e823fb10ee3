use axum::{middleware, routing::get, Router};

use shared_utils::extractor::session_middleware;
use shared_utils::AppState;

use crate::handlers::*;

/// Mounted at `/patients`. Shares the `{patient_id}` segment with the
/// visit routes so the two routers can be merged.
pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_patients).post(create_patient))
        .route("/page/{page}/limit/{limit}", get(list_patients_page))
        .route(
            "/{patient_id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
