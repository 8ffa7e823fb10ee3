use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::Session;
use shared_models::clinical::{Medication, MedicationId};
use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, PathParams, QueryParams};
use shared_utils::pagination::{PagePath, PageQuery, PagedJson};
use shared_utils::AppState;

use crate::models::MedicationDraft;
use crate::service::MedicationService;

#[axum::debug_handler]
pub async fn create_medication(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    JsonBody(draft): JsonBody<MedicationDraft>,
) -> Result<Json<Medication>, AppError> {
    let service = MedicationService::new(&state);
    Ok(Json(service.create_medication(draft, &session).await?))
}

#[axum::debug_handler]
pub async fn list_medications(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Medication>, AppError> {
    let request = query.resolve(&state.config)?;
    Ok(PagedJson(MedicationService::new(&state).list_medications(request).await))
}

#[axum::debug_handler]
pub async fn list_medications_page(
    State(state): State<AppState>,
    PathParams(path): PathParams<PagePath>,
) -> Result<PagedJson<Medication>, AppError> {
    let request = path.resolve(&state.config)?;
    Ok(PagedJson(MedicationService::new(&state).list_medications(request).await))
}

#[axum::debug_handler]
pub async fn get_medication(
    State(state): State<AppState>,
    PathParams(id): PathParams<MedicationId>,
) -> Result<Json<Medication>, AppError> {
    Ok(Json(MedicationService::new(&state).get_medication(id).await?))
}

#[axum::debug_handler]
pub async fn update_medication(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(id): PathParams<MedicationId>,
    JsonBody(draft): JsonBody<MedicationDraft>,
) -> Result<Json<Medication>, AppError> {
    let service = MedicationService::new(&state);
    Ok(Json(service.update_medication(id, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn delete_medication(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(id): PathParams<MedicationId>,
) -> Result<Json<Value>, AppError> {
    MedicationService::new(&state)
        .delete_medication(id, &session)
        .await?;
    Ok(Json(json!({ "message": "Medication deleted successfully" })))
}
