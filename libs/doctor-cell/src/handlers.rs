use axum::{extract::State, Json};

use shared_models::clinical::Doctor;
use shared_models::error::AppError;
use shared_utils::extractor::PathParams;
use shared_utils::AppState;

use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    Json(DoctorService::new(&state).list_doctors().await)
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    PathParams(doctor_id): PathParams<String>,
) -> Result<Json<Doctor>, AppError> {
    Ok(Json(DoctorService::new(&state).get_doctor(&doctor_id).await?))
}
