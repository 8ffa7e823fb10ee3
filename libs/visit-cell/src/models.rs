use serde::{Deserialize, Serialize};

use shared_database::{PrescriptionFields, VisitFields};
use shared_models::clinical::{DoctorId, MedicationId, PatientId, VisitId};
use shared_models::error::AppError;
use shared_utils::validation::Validator;

/// Body of the visit create and update routes. `doctorId` is only read on
/// create; a visit keeps the doctor it was recorded with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitDraft {
    pub visit_time: Option<String>,
    pub symptoms: Option<String>,
    pub treatment: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub doctor_id: Option<DoctorId>,
}

impl VisitDraft {
    pub fn validate_new(self) -> Result<(DoctorId, VisitFields), AppError> {
        let mut v = Validator::new();
        let doctor_id = v.text(self.doctor_id.clone(), "doctorId");
        let fields = self.collect(&mut v);
        v.finish(|| Some((doctor_id, fields?)))
    }

    pub fn validate_update(self) -> Result<VisitFields, AppError> {
        let mut v = Validator::new();
        let fields = self.collect(&mut v);
        v.finish(|| fields)
    }

    fn collect(self, v: &mut Validator) -> Option<VisitFields> {
        let visit_time = v.timestamp(self.visit_time, "visitTime");
        let symptoms = v.text(self.symptoms, "symptoms");
        let diagnosis = v.text(self.diagnosis, "diagnosis");

        Some(VisitFields {
            visit_time: visit_time?,
            symptoms,
            treatment: Validator::optional_text(self.treatment).unwrap_or_default(),
            diagnosis,
            notes: Validator::optional_text(self.notes).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    pub quantity: Option<i64>,
    pub instructions: Option<String>,
    /// Days.
    pub duration: Option<i64>,
    pub medication_id: Option<MedicationId>,
}

impl PrescriptionDraft {
    pub fn validate(self) -> Result<PrescriptionFields, AppError> {
        let mut v = Validator::new();
        let quantity = v.positive(self.quantity, "quantity");
        let instructions = v.text(self.instructions, "instructions");
        let duration = v.positive(self.duration, "duration");
        let medication_id = v.required(self.medication_id, "medicationId");

        v.finish(|| {
            Some(PrescriptionFields {
                quantity,
                instructions,
                duration,
                medication_id: medication_id?,
            })
        })
    }
}

/// `/{patient_id}/visits/page/{page}/limit/{limit}`
#[derive(Debug, Clone, Deserialize)]
pub struct VisitPagePath {
    pub patient_id: PatientId,
    pub page: usize,
    pub limit: usize,
}

/// `/{patient_id}/visits/{visit_id}/page/{page}/limit/{limit}`
#[derive(Debug, Clone, Deserialize)]
pub struct PrescriptionPagePath {
    pub patient_id: PatientId,
    pub visit_id: VisitId,
    pub page: usize,
    pub limit: usize,
}
