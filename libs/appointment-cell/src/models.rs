use serde::{Deserialize, Serialize};

use shared_database::AppointmentFields;
use shared_models::clinical::{DoctorId, PatientId};
use shared_models::error::AppError;
use shared_models::scheduling::{AppointmentStatus, AppointmentType};
use shared_utils::validation::Validator;

/// Body of `POST /appointments` and `PUT /appointments/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub patient_id: Option<PatientId>,
    pub doctor_id: Option<DoctorId>,
    pub appointment_type: Option<AppointmentType>,
    pub description: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub appointment_status: Option<AppointmentStatus>,
}

impl AppointmentDraft {
    /// A missing status means `WAITING`, on update as well as create.
    pub fn validate(self) -> Result<AppointmentFields, AppError> {
        let mut v = Validator::new();
        let patient_id = v.text(self.patient_id, "patientId");
        let doctor_id = v.text(self.doctor_id, "doctorId");
        let appointment_type = v.required(self.appointment_type, "appointmentType");
        let from_date = v.timestamp(self.from_date, "fromDate");
        let to_date = v.timestamp(self.to_date, "toDate");
        if let (Some(from), Some(to)) = (from_date, to_date) {
            v.check(to > from, "toDate must be after fromDate");
        }

        v.finish(|| {
            Some(AppointmentFields {
                patient_id,
                doctor_id,
                appointment_type: appointment_type?,
                description: Validator::optional_text(self.description),
                from_date: from_date?,
                to_date: to_date?,
                appointment_status: self.appointment_status.unwrap_or_default(),
            })
        })
    }
}
