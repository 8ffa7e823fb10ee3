use tracing::debug;

use shared_database::{CascadeSummary, VisitScope};
use shared_models::auth::Session;
use shared_models::clinical::Visit;
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};
use shared_utils::AppState;

use crate::models::VisitDraft;

pub struct VisitService<'a> {
    state: &'a AppState,
}

impl<'a> VisitService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_visit(
        &self,
        patient_id: &str,
        draft: VisitDraft,
        session: &Session,
    ) -> Result<Visit, AppError> {
        let (doctor_id, fields) = draft.validate_new()?;
        debug!("Recording visit for patient {} with doctor {}", patient_id, doctor_id);

        self.state
            .commit(
                session,
                "Visit Recorded",
                self.state.store.create_visit(patient_id, &doctor_id, fields),
                |visit: &Visit| {
                    format!(
                        "{} visited {}",
                        visit.patient.full_name(),
                        visit.doctor.display_name()
                    )
                },
            )
            .await
    }

    pub async fn list_visits(
        &self,
        patient_id: &str,
        request: PageRequest,
    ) -> Result<Page<Visit>, AppError> {
        Ok(self.state.store.list_visits(patient_id, request).await?)
    }

    pub async fn get_visit(&self, scope: &VisitScope) -> Result<Visit, AppError> {
        Ok(self.state.store.get_visit(scope).await?)
    }

    pub async fn update_visit(
        &self,
        scope: &VisitScope,
        draft: VisitDraft,
        session: &Session,
    ) -> Result<Visit, AppError> {
        let fields = draft.validate_update()?;
        self.state
            .commit(
                session,
                "Visit Updated",
                self.state.store.update_visit(scope, fields),
                |visit: &Visit| {
                    format!("Visit {} of {} was updated", visit.id, visit.patient.full_name())
                },
            )
            .await
    }

    pub async fn delete_visit(
        &self,
        scope: &VisitScope,
        session: &Session,
    ) -> Result<CascadeSummary, AppError> {
        self.state
            .commit(
                session,
                "Visit Removed",
                self.state.store.delete_visit(scope),
                |summary: &CascadeSummary| {
                    format!(
                        "Visit {} was removed with {} prescription(s)",
                        scope.visit_id, summary.prescriptions
                    )
                },
            )
            .await
    }
}
