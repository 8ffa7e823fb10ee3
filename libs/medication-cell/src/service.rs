use tracing::debug;

use shared_database::StoreError;
use shared_models::auth::Session;
use shared_models::clinical::{Medication, MedicationId};
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};
use shared_utils::AppState;

use crate::models::MedicationDraft;

pub struct MedicationService<'a> {
    state: &'a AppState,
}

impl<'a> MedicationService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create_medication(
        &self,
        draft: MedicationDraft,
        session: &Session,
    ) -> Result<Medication, AppError> {
        let fields = draft.validate()?;
        let medication = self
            .state
            .commit(
                session,
                "Medication Added",
                self.state.store.create_medication(fields),
                |medication: &Medication| {
                    format!("{} {} added to the formulary", medication.name, medication.dosage)
                },
            )
            .await?;
        debug!("Medication {} added as {}", medication.name, medication.id);
        Ok(medication)
    }

    pub async fn list_medications(&self, request: PageRequest) -> Page<Medication> {
        self.state.store.list_medications(request).await
    }

    pub async fn get_medication(&self, id: MedicationId) -> Result<Medication, AppError> {
        Ok(self.state.store.get_medication(id).await?)
    }

    pub async fn update_medication(
        &self,
        id: MedicationId,
        draft: MedicationDraft,
        session: &Session,
    ) -> Result<Medication, AppError> {
        let fields = draft.validate()?;
        self.state
            .commit(
                session,
                "Medication Updated",
                self.state.store.update_medication(id, fields),
                |medication: &Medication| format!("{} was updated", medication.name),
            )
            .await
    }

    pub async fn delete_medication(
        &self,
        id: MedicationId,
        session: &Session,
    ) -> Result<(), AppError> {
        let store = &self.state.store;
        let removal = async {
            let medication = store.get_medication(id).await?;
            store.delete_medication(id).await?;
            Ok::<_, StoreError>(medication)
        };

        self.state
            .commit(
                session,
                "Medication Removed",
                removal,
                |medication: &Medication| format!("{} was removed from the formulary", medication.name),
            )
            .await?;
        Ok(())
    }
}
