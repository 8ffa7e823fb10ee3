use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_database::PatientFields;
use shared_models::clinical::Gender;
use shared_models::error::AppError;
use shared_utils::validation::Validator;

/// Body of `POST /patients` and `PUT /patients/{id}`. Missing fields are
/// reported by [`PatientDraft::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

impl PatientDraft {
    pub fn validate(self, today: NaiveDate) -> Result<PatientFields, AppError> {
        let mut v = Validator::new();

        let first_name = v.text(self.first_name, "firstName");
        let last_name = v.text(self.last_name, "lastName");
        let gender = v.required(self.gender, "gender");
        let date_of_birth = v.date(self.date_of_birth, "dateOfBirth");
        if let Some(dob) = date_of_birth {
            v.check(dob <= today, "dateOfBirth cannot be in the future");
        }
        let email = v.email(self.email, "email");
        let contact_number = v.text(self.contact_number, "contactNumber");
        let address = Validator::optional_text(self.address);

        v.finish(|| {
            Some(PatientFields {
                first_name,
                last_name,
                gender: gender?,
                date_of_birth: date_of_birth?,
                email,
                contact_number,
                address,
            })
        })
    }
}
