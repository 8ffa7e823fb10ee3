//! Validated field sets handed to the store and the rows it keeps.
//!
//! Rows hold references by id; the public representations in
//! `shared_models` embed the referenced records and are assembled on read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared_models::clinical::{
    DoctorId, Gender, Medication, MedicationId, Patient, PatientId, VisitId,
};
use shared_models::scheduling::{AppointmentStatus, AppointmentType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub contact_number: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitFields {
    pub visit_time: DateTime<Utc>,
    pub symptoms: String,
    pub treatment: String,
    pub diagnosis: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionFields {
    pub quantity: u32,
    pub instructions: String,
    pub duration: u32,
    pub medication_id: MedicationId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationFields {
    pub name: String,
    pub description: String,
    pub dosage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentFields {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub appointment_type: AppointmentType,
    pub description: Option<String>,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    pub appointment_status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PatientRow {
    pub id: PatientId,
    pub fields: PatientFields,
}

impl PatientRow {
    pub fn to_patient(&self) -> Patient {
        let f = &self.fields;
        Patient {
            id: self.id.clone(),
            first_name: f.first_name.clone(),
            last_name: f.last_name.clone(),
            gender: f.gender,
            date_of_birth: f.date_of_birth,
            email: f.email.clone(),
            contact_number: f.contact_number.clone(),
            address: f.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct VisitRow {
    pub id: VisitId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub fields: VisitFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PrescriptionRow {
    pub id: i64,
    pub visit_id: VisitId,
    pub fields: PrescriptionFields,
}

impl MedicationFields {
    pub(crate) fn into_medication(self, id: MedicationId) -> Medication {
        Medication {
            id,
            name: self.name,
            description: self.description,
            dosage: self.dosage,
        }
    }
}

/// Counts of what a delete took with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeSummary {
    pub visits: usize,
    pub prescriptions: usize,
    pub appointments: usize,
}

/// Row counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub patients: usize,
    pub doctors: usize,
    pub visits: usize,
    pub prescriptions: usize,
    pub medications: usize,
    pub appointments: usize,
}

