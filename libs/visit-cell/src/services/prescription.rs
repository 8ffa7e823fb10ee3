use tracing::debug;

use shared_database::{PrescriptionScope, VisitScope};
use shared_models::auth::Session;
use shared_models::clinical::Prescription;
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};
use shared_utils::AppState;

use crate::models::PrescriptionDraft;

pub struct PrescriptionService<'a> {
    state: &'a AppState,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_prescription(
        &self,
        scope: &VisitScope,
        draft: PrescriptionDraft,
        session: &Session,
    ) -> Result<Prescription, AppError> {
        let fields = draft.validate()?;
        debug!(
            "Prescribing medication {} on visit {}",
            fields.medication_id, scope.visit_id
        );

        self.state
            .commit(
                session,
                "Prescription Added",
                self.state.store.create_prescription(scope, fields),
                |prescription: &Prescription| {
                    format!(
                        "{} prescribed to {}",
                        prescription.medication.name,
                        prescription.patient_visit.patient.full_name()
                    )
                },
            )
            .await
    }

    pub async fn list_prescriptions(
        &self,
        scope: &VisitScope,
        request: PageRequest,
    ) -> Result<Page<Prescription>, AppError> {
        Ok(self.state.store.list_prescriptions(scope, request).await?)
    }

    pub async fn get_prescription(
        &self,
        scope: &PrescriptionScope,
    ) -> Result<Prescription, AppError> {
        Ok(self.state.store.get_prescription(scope).await?)
    }

    pub async fn update_prescription(
        &self,
        scope: &PrescriptionScope,
        draft: PrescriptionDraft,
        session: &Session,
    ) -> Result<Prescription, AppError> {
        let fields = draft.validate()?;
        self.state
            .commit(
                session,
                "Prescription Updated",
                self.state.store.update_prescription(scope, fields),
                |prescription: &Prescription| format!("Prescription {} was updated", prescription.id),
            )
            .await
    }

    pub async fn delete_prescription(
        &self,
        scope: &PrescriptionScope,
        session: &Session,
    ) -> Result<(), AppError> {
        self.state
            .commit(
                session,
                "Prescription Removed",
                self.state.store.delete_prescription(scope),
                |_: &()| format!("Prescription {} was removed", scope.prescription_id),
            )
            .await
    }
}
