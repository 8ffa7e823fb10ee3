use axum::{middleware, routing::get, Router};

use shared_utils::extractor::session_middleware;
use shared_utils::AppState;

use crate::handlers::*;

pub fn medication_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_medications).post(create_medication))
        .route("/page/{page}/limit/{limit}", get(list_medications_page))
        .route(
            "/{medication_id}",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
