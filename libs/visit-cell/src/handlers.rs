use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::{PrescriptionScope, VisitScope};
use shared_models::auth::Session;
use shared_models::clinical::{Prescription, Visit};
use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, PathParams, QueryParams};
use shared_utils::pagination::{page_request, PageQuery, PagedJson};
use shared_utils::AppState;

use crate::models::{PrescriptionDraft, PrescriptionPagePath, VisitDraft, VisitPagePath};
use crate::services::{PrescriptionService, VisitService};

// ---------------------------------------------------------------------------
// Visits
// ---------------------------------------------------------------------------

#[axum::debug_handler]
pub async fn create_visit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(patient_id): PathParams<String>,
    JsonBody(draft): JsonBody<VisitDraft>,
) -> Result<Json<Visit>, AppError> {
    let service = VisitService::new(&state);
    Ok(Json(service.create_visit(&patient_id, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn list_visits(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Visit>, AppError> {
    let request = query.resolve(&state.config)?;
    let service = VisitService::new(&state);
    Ok(PagedJson(service.list_visits(&patient_id, request).await?))
}

#[axum::debug_handler]
pub async fn list_visits_page(
    State(state): State<AppState>,
    PathParams(path): PathParams<VisitPagePath>,
) -> Result<PagedJson<Visit>, AppError> {
    let request = page_request(Some(path.page), Some(path.limit), &state.config)?;
    let service = VisitService::new(&state);
    Ok(PagedJson(service.list_visits(&path.patient_id, request).await?))
}

#[axum::debug_handler]
pub async fn get_visit(
    State(state): State<AppState>,
    PathParams(scope): PathParams<VisitScope>,
) -> Result<Json<Visit>, AppError> {
    let service = VisitService::new(&state);
    Ok(Json(service.get_visit(&scope).await?))
}

#[axum::debug_handler]
pub async fn update_visit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(scope): PathParams<VisitScope>,
    JsonBody(draft): JsonBody<VisitDraft>,
) -> Result<Json<Visit>, AppError> {
    let service = VisitService::new(&state);
    Ok(Json(service.update_visit(&scope, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn delete_visit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(scope): PathParams<VisitScope>,
) -> Result<Json<Value>, AppError> {
    let service = VisitService::new(&state);
    let removed = service.delete_visit(&scope, &session).await?;

    Ok(Json(json!({
        "message": "Visit deleted successfully",
        "removed": removed
    })))
}

// ---------------------------------------------------------------------------
// Prescriptions
// ---------------------------------------------------------------------------

#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(scope): PathParams<VisitScope>,
    JsonBody(draft): JsonBody<PrescriptionDraft>,
) -> Result<Json<Prescription>, AppError> {
    let service = PrescriptionService::new(&state);
    Ok(Json(service.create_prescription(&scope, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn list_prescriptions(
    State(state): State<AppState>,
    PathParams(scope): PathParams<VisitScope>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<PagedJson<Prescription>, AppError> {
    let request = query.resolve(&state.config)?;
    let service = PrescriptionService::new(&state);
    Ok(PagedJson(service.list_prescriptions(&scope, request).await?))
}

#[axum::debug_handler]
pub async fn list_prescriptions_page(
    State(state): State<AppState>,
    PathParams(path): PathParams<PrescriptionPagePath>,
) -> Result<PagedJson<Prescription>, AppError> {
    let request = page_request(Some(path.page), Some(path.limit), &state.config)?;
    let scope = VisitScope {
        patient_id: path.patient_id,
        visit_id: path.visit_id,
    };
    let service = PrescriptionService::new(&state);
    Ok(PagedJson(service.list_prescriptions(&scope, request).await?))
}

#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<AppState>,
    PathParams(scope): PathParams<PrescriptionScope>,
) -> Result<Json<Prescription>, AppError> {
    let service = PrescriptionService::new(&state);
    Ok(Json(service.get_prescription(&scope).await?))
}

#[axum::debug_handler]
pub async fn update_prescription(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(scope): PathParams<PrescriptionScope>,
    JsonBody(draft): JsonBody<PrescriptionDraft>,
) -> Result<Json<Prescription>, AppError> {
    let service = PrescriptionService::new(&state);
    Ok(Json(service.update_prescription(&scope, draft, &session).await?))
}

#[axum::debug_handler]
pub async fn delete_prescription(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    PathParams(scope): PathParams<PrescriptionScope>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    service.delete_prescription(&scope, &session).await?;

    Ok(Json(json!({ "message": "Prescription deleted successfully" })))
}
