use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::Session;
use shared_models::clinical::Patient;
use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, PathParams, QueryParams};
use shared_utils::pagination::{PagePath, PageQuery, PagedJson};
use shared_utils::AppState;

use crate::models::PatientDraft;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    JsonBody(draft): JsonBody<PatientDraft>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);
    let patient = service.create_patient(draft, &session).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Patient>, AppError> {
    let request = query.resolve(&state.config)?;
    let service = PatientService::new(&state);
    Ok(PagedJson(service.list_patients(request).await))
}

#[axum::debug_handler]
pub async fn list_patients_page(
    State(state): State<AppState>,
    PathParams(path): PathParams<PagePath>,
) -> Result<PagedJson<Patient>, AppError> {
    let request = path.resolve(&state.config)?;
    let service = PatientService::new(&state);
    Ok(PagedJson(service.list_patients(request).await))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);
    Ok(Json(service.get_patient(&patient_id).await?))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(patient_id): PathParams<String>,
    JsonBody(draft): JsonBody<PatientDraft>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&state);
    let patient = service.update_patient(&patient_id, draft, &session).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(patient_id): PathParams<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);
    let removed = service.delete_patient(&patient_id, &session).await?;

    Ok(Json(json!({
        "message": "Patient deleted successfully",
        "removed": removed
    })))
}
