use serde::{Deserialize, Serialize};

use shared_database::MedicationFields;
use shared_models::error::AppError;
use shared_utils::validation::Validator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dosage: Option<String>,
}

impl MedicationDraft {
    pub fn validate(self) -> Result<MedicationFields, AppError> {
        let mut v = Validator::new();
        let name = v.text(self.name, "name");
        let dosage = v.text(self.dosage, "dosage");
        let description = Validator::optional_text(self.description).unwrap_or_default();

        v.finish(|| {
            Some(MedicationFields {
                name,
                description,
                dosage,
            })
        })
    }
}
