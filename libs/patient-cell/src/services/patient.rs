use chrono::Utc;
use tracing::debug;

use shared_database::{CascadeSummary, StoreError};
use shared_models::auth::Session;
use shared_models::clinical::Patient;
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};
use shared_utils::AppState;

use crate::models::PatientDraft;

pub struct PatientService<'a> {
    state: &'a AppState,
}

impl<'a> PatientService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_patient(
        &self,
        draft: PatientDraft,
        session: &Session,
    ) -> Result<Patient, AppError> {
        let fields = draft.validate(Utc::now().date_naive())?;
        debug!("Creating patient record for: {}", fields.email);

        let patient = self
            .state
            .commit(
                session,
                "Patient Added",
                self.state.store.create_patient(fields),
                |patient: &Patient| format!("New patient {} was registered", patient.full_name()),
            )
            .await?;
        debug!("Patient created successfully with ID: {}", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<Patient, AppError> {
        debug!("Fetching patient: {}", patient_id);
        Ok(self.state.store.get_patient(patient_id).await?)
    }

    pub async fn list_patients(&self, request: PageRequest) -> Page<Patient> {
        debug!("Listing patients page {} (limit {})", request.page, request.limit);
        self.state.store.list_patients(request).await
    }

    pub async fn update_patient(
        &self,
        patient_id: &str,
        draft: PatientDraft,
        session: &Session,
    ) -> Result<Patient, AppError> {
        let fields = draft.validate(Utc::now().date_naive())?;
        debug!("Updating patient: {}", patient_id);

        self.state
            .commit(
                session,
                "Patient Updated",
                self.state.store.update_patient(patient_id, fields),
                |patient: &Patient| format!("Details updated for {}", patient.full_name()),
            )
            .await
    }

    pub async fn delete_patient(
        &self,
        patient_id: &str,
        session: &Session,
    ) -> Result<CascadeSummary, AppError> {
        let store = &self.state.store;
        let removal = async {
            let patient = store.get_patient(patient_id).await?;
            let summary = store.delete_patient(patient_id).await?;
            Ok::<_, StoreError>((patient, summary))
        };

        let (_, summary) = self
            .state
            .commit(
                session,
                "Patient Removed",
                removal,
                |(patient, summary): &(Patient, CascadeSummary)| {
                    format!(
                        "Patient {} was removed with {} visit(s)",
                        patient.full_name(),
                        summary.visits
                    )
                },
            )
            .await?;
        Ok(summary)
    }
}
