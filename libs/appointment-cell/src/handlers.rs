use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::pagination::PageRequest;
use shared_models::scheduling::{Appointment, AppointmentId};
use shared_utils::extractor::{JsonBody, PathParams, QueryParams};
use shared_utils::pagination::{PageQuery, PagedJson};
use shared_utils::AppState;

use crate::models::AppointmentDraft;
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    JsonBody(draft): JsonBody<AppointmentDraft>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentService::new(&state);
    Ok(Json(service.book_appointment(draft, &session).await?))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Appointment>, AppError> {
    let request = if query.is_unset() {
        PageRequest::all()
    } else {
        query.resolve(&state.config)?
    };
    Ok(PagedJson(AppointmentService::new(&state).list_appointments(request).await))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    PathParams(appointment_id): PathParams<AppointmentId>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentService::new(&state);
    Ok(Json(service.get_appointment(appointment_id).await?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(appointment_id): PathParams<AppointmentId>,
    JsonBody(draft): JsonBody<AppointmentDraft>,
) -> Result<Json<Appointment>, AppError> {
    let service = AppointmentService::new(&state);
    Ok(Json(service.update_appointment(appointment_id, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(appointment_id): PathParams<AppointmentId>,
) -> Result<Json<Value>, AppError> {
    AppointmentService::new(&state)
        .delete_appointment(appointment_id, &session)
        .await?;
    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<AppState>,
    PathParams(doctor_id): PathParams<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Appointment>, AppError> {
    let request = query.resolve(&state.config)?;
    let service = AppointmentService::new(&state);
    Ok(PagedJson(service.doctor_appointments(&doctor_id, request).await?))
}

#[axum::debug_handler]
pub async fn get_appointments_by_phone(
    State(state): State<AppState>,
    PathParams(phone_number): PathParams<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = AppointmentService::new(&state);
    Ok(Json(service.appointments_by_phone(&phone_number).await))
}
