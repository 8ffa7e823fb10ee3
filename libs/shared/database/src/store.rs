use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::activity::ActivityEntry;
use shared_models::clinical::{
    Doctor, DoctorId, Medication, MedicationId, Patient, PatientId, Prescription,
    PrescriptionId, Visit, VisitId,
};
use shared_models::pagination::{Page, PageRequest};
use shared_models::scheduling::{Appointment, AppointmentId};

use crate::error::{StoreError, StoreResult};
use crate::records::{
    AppointmentFields, CascadeSummary, MedicationFields, PatientFields, PatientRow,
    PrescriptionFields, PrescriptionRow, StoreStats, VisitFields, VisitRow,
};
use crate::scope::{PrescriptionScope, Scope, VisitScope};
use crate::table::Table;

/// Per-table id counters. They only move forward, so deleted ids are never
/// handed out again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Sequences {
    visits: i64,
    medications: i64,
    prescriptions: i64,
    appointments: i64,
    activity: u64,
}

fn advance(counter: &mut i64, table: &'static str) -> StoreResult<i64> {
    *counter = counter
        .checked_add(1)
        .ok_or(StoreError::SequenceExhausted(table))?;
    Ok(*counter)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub(crate) patients: Table<PatientId, PatientRow>,
    pub(crate) doctors: Table<DoctorId, Doctor>,
    pub(crate) visits: Table<VisitId, VisitRow>,
    pub(crate) medications: Table<MedicationId, Medication>,
    pub(crate) prescriptions: Table<PrescriptionId, PrescriptionRow>,
    pub(crate) appointments: Table<AppointmentId, Appointment>,
    visits_by_patient: HashMap<PatientId, BTreeSet<VisitId>>,
    prescriptions_by_visit: HashMap<VisitId, BTreeSet<PrescriptionId>>,
    pub(crate) activity: VecDeque<ActivityEntry>,
    sequences: Sequences,
}

impl Tables {
    fn doctor(&self, id: &DoctorId) -> StoreResult<&Doctor> {
        self.doctors
            .get(id)
            .ok_or_else(|| StoreError::not_found("Doctor", id))
    }

    fn medication(&self, id: MedicationId) -> StoreResult<&Medication> {
        self.medications
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Medication", id))
    }

    fn assemble_visit(&self, row: &VisitRow) -> StoreResult<Visit> {
        let patient = self
            .patients
            .get(&row.patient_id)
            .ok_or_else(|| StoreError::not_found("Patient", &row.patient_id))?;
        let doctor = self.doctor(&row.doctor_id)?;
        let f = &row.fields;
        Ok(Visit {
            id: row.id,
            visit_time: f.visit_time,
            symptoms: f.symptoms.clone(),
            treatment: f.treatment.clone(),
            diagnosis: f.diagnosis.clone(),
            notes: f.notes.clone(),
            patient: patient.to_patient(),
            doctor: doctor.clone(),
        })
    }

    fn assemble_prescription(&self, row: &PrescriptionRow) -> StoreResult<Prescription> {
        let visit = self
            .visits
            .get(&row.visit_id)
            .ok_or_else(|| StoreError::not_found("Visit", row.visit_id))?;
        let medication = self.medication(row.fields.medication_id)?;
        Ok(Prescription {
            id: row.id,
            quantity: row.fields.quantity,
            instructions: row.fields.instructions.clone(),
            duration: row.fields.duration,
            patient_visit: self.assemble_visit(visit)?,
            medication: medication.clone(),
        })
    }

    fn check_appointment_refs(&self, fields: &AppointmentFields) -> StoreResult<()> {
        if !self.patients.contains(&fields.patient_id) {
            return Err(StoreError::not_found("Patient", &fields.patient_id));
        }
        self.doctor(&fields.doctor_id)?;
        Ok(())
    }

    /// Removes a visit row together with its prescriptions. The caller has
    /// already resolved the visit.
    fn drop_visit(&mut self, visit_id: VisitId) -> CascadeSummary {
        let mut summary = CascadeSummary::default();
        if let Some(row) = self.visits.remove(&visit_id) {
            summary.visits = 1;
            if let Some(ids) = self.visits_by_patient.get_mut(&row.patient_id) {
                ids.remove(&visit_id);
            }
        }
        for prescription_id in self.prescriptions_by_visit.remove(&visit_id).unwrap_or_default() {
            if self.prescriptions.remove(&prescription_id).is_some() {
                summary.prescriptions += 1;
            }
        }
        summary
    }

    fn push_activity(&mut self, entry: ActivityEntry, capacity: usize) {
        self.activity.push_front(entry);
        self.activity.truncate(capacity);
    }
}

/// In-memory clinical records store.
///
/// One `RwLock` guards every table. Reads share it; each mutation, including
/// its parent-chain checks and cascades, runs under the write lock, so a
/// visit can never be created under a patient that is concurrently deleted.
pub struct ClinicStore {
    tables: RwLock<Tables>,
    activity_capacity: usize,
}

impl ClinicStore {
    pub fn new(activity_capacity: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            activity_capacity,
        }
    }

    pub(crate) fn from_tables(tables: Tables, activity_capacity: usize) -> Self {
        Self {
            tables: RwLock::new(tables),
            activity_capacity,
        }
    }

    pub(crate) async fn read_tables(&self) -> tokio::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    // ---------------------------------------------------------------------
    // Doctors
    // ---------------------------------------------------------------------

    /// Adds roster entries whose id is not present yet. Returns how many were
    /// added.
    pub async fn seed_doctors(&self, doctors: Vec<Doctor>) -> usize {
        let mut tables = self.tables.write().await;
        let mut added = 0;
        for doctor in doctors {
            let id = doctor.id.clone();
            if tables.doctors.insert(id.clone(), doctor) {
                added += 1;
            } else {
                debug!("Doctor {} already on the roster, skipping", id);
            }
        }
        added
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.tables.read().await.doctors.values().cloned().collect()
    }

    pub async fn get_doctor(&self, id: &str) -> StoreResult<Doctor> {
        let tables = self.tables.read().await;
        tables.doctor(&id.to_string()).cloned()
    }

    // ---------------------------------------------------------------------
    // Patients
    // ---------------------------------------------------------------------

    pub async fn create_patient(&self, fields: PatientFields) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        let mut id = Uuid::new_v4().to_string();
        while tables.patients.contains(&id) {
            id = Uuid::new_v4().to_string();
        }
        let row = PatientRow { id: id.clone(), fields };
        let patient = row.to_patient();
        tables.patients.insert(id.clone(), row);
        tables.visits_by_patient.insert(id, BTreeSet::new());
        Ok(patient)
    }

    pub async fn list_patients(&self, request: PageRequest) -> Page<Patient> {
        let tables = self.tables.read().await;
        let items = tables.patients.page(request).map(PatientRow::to_patient).collect();
        Page::new(items, tables.patients.len(), request)
    }

    pub async fn get_patient(&self, id: &str) -> StoreResult<Patient> {
        let tables = self.tables.read().await;
        Ok(tables.resolve(Scope::Patient(id))?.patient.to_patient())
    }

    pub async fn update_patient(&self, id: &str, fields: PatientFields) -> StoreResult<Patient> {
        let mut tables = self.tables.write().await;
        let row = tables
            .patients
            .get_mut(&id.to_string())
            .ok_or_else(|| StoreError::not_found("Patient", id))?;
        row.fields = fields;
        Ok(row.to_patient())
    }

    /// Deletes the patient with every visit, prescription and appointment
    /// that hangs off it.
    pub async fn delete_patient(&self, id: &str) -> StoreResult<CascadeSummary> {
        let mut tables = self.tables.write().await;
        let patient_id = tables.resolve(Scope::Patient(id))?.patient.id.clone();

        let mut summary = CascadeSummary::default();
        let visit_ids = tables.visits_by_patient.remove(&patient_id).unwrap_or_default();
        for visit_id in visit_ids {
            let dropped = tables.drop_visit(visit_id);
            summary.visits += dropped.visits;
            summary.prescriptions += dropped.prescriptions;
        }
        summary.appointments = tables
            .appointments
            .retain(|appointment| appointment.patient_id != patient_id);
        tables.patients.remove(&patient_id);

        info!(
            "Deleted patient {} with {} visits, {} prescriptions, {} appointments",
            patient_id, summary.visits, summary.prescriptions, summary.appointments
        );
        Ok(summary)
    }

    // ---------------------------------------------------------------------
    // Visits
    // ---------------------------------------------------------------------

    pub async fn create_visit(
        &self,
        patient_id: &str,
        doctor_id: &str,
        fields: VisitFields,
    ) -> StoreResult<Visit> {
        let mut tables = self.tables.write().await;
        let patient_id = tables.resolve(Scope::Patient(patient_id))?.patient.id.clone();
        let doctor_id = tables.doctor(&doctor_id.to_string())?.id.clone();

        let id = advance(&mut tables.sequences.visits, "visits")?;
        let row = VisitRow {
            id,
            patient_id: patient_id.clone(),
            doctor_id,
            fields,
        };
        let visit = tables.assemble_visit(&row)?;
        tables.visits.insert(id, row);
        tables.visits_by_patient.entry(patient_id).or_default().insert(id);
        Ok(visit)
    }

    pub async fn list_visits(
        &self,
        patient_id: &str,
        request: PageRequest,
    ) -> StoreResult<Page<Visit>> {
        let tables = self.tables.read().await;
        let patient_id = tables.resolve(Scope::Patient(patient_id))?.patient.id.clone();
        let ids = tables.visits_by_patient.get(&patient_id);
        let total = ids.map_or(0, BTreeSet::len);

        let items = ids
            .into_iter()
            .flatten()
            .skip(request.offset())
            .take(request.limit)
            .filter_map(|id| tables.visits.get(id))
            .map(|row| tables.assemble_visit(row))
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Page::new(items, total, request))
    }

    pub async fn get_visit(&self, scope: &VisitScope) -> StoreResult<Visit> {
        let tables = self.tables.read().await;
        let resolved = tables.resolve(Scope::Visit(scope))?;
        let row = resolved.visit.ok_or_else(|| StoreError::not_found("Visit", scope.visit_id))?;
        tables.assemble_visit(row)
    }

    /// Replaces the clinical fields; patient and doctor stay as created.
    pub async fn update_visit(&self, scope: &VisitScope, fields: VisitFields) -> StoreResult<Visit> {
        let mut tables = self.tables.write().await;
        tables.resolve(Scope::Visit(scope))?;
        let row = tables
            .visits
            .get_mut(&scope.visit_id)
            .ok_or_else(|| StoreError::not_found("Visit", scope.visit_id))?;
        row.fields = fields;
        let row = row.clone();
        tables.assemble_visit(&row)
    }

    pub async fn delete_visit(&self, scope: &VisitScope) -> StoreResult<CascadeSummary> {
        let mut tables = self.tables.write().await;
        tables.resolve(Scope::Visit(scope))?;
        let summary = tables.drop_visit(scope.visit_id);
        debug!(
            "Deleted visit {} of patient {} with {} prescriptions",
            scope.visit_id, scope.patient_id, summary.prescriptions
        );
        Ok(summary)
    }

    // ---------------------------------------------------------------------
    // Prescriptions
    // ---------------------------------------------------------------------

    pub async fn create_prescription(
        &self,
        scope: &VisitScope,
        fields: PrescriptionFields,
    ) -> StoreResult<Prescription> {
        let mut tables = self.tables.write().await;
        tables.resolve(Scope::Visit(scope))?;
        tables.medication(fields.medication_id)?;

        let id = advance(&mut tables.sequences.prescriptions, "prescriptions")?;
        let row = PrescriptionRow {
            id,
            visit_id: scope.visit_id,
            fields,
        };
        let prescription = tables.assemble_prescription(&row)?;
        tables.prescriptions.insert(id, row);
        tables
            .prescriptions_by_visit
            .entry(scope.visit_id)
            .or_default()
            .insert(id);
        Ok(prescription)
    }

    pub async fn list_prescriptions(
        &self,
        scope: &VisitScope,
        request: PageRequest,
    ) -> StoreResult<Page<Prescription>> {
        let tables = self.tables.read().await;
        tables.resolve(Scope::Visit(scope))?;
        let ids = tables.prescriptions_by_visit.get(&scope.visit_id);
        let total = ids.map_or(0, BTreeSet::len);

        let items = ids
            .into_iter()
            .flatten()
            .skip(request.offset())
            .take(request.limit)
            .filter_map(|id| tables.prescriptions.get(id))
            .map(|row| tables.assemble_prescription(row))
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Page::new(items, total, request))
    }

    pub async fn get_prescription(&self, scope: &PrescriptionScope) -> StoreResult<Prescription> {
        let tables = self.tables.read().await;
        let resolved = tables.resolve(Scope::Prescription(scope))?;
        let row = resolved
            .prescription
            .ok_or_else(|| StoreError::not_found("Prescription", scope.prescription_id))?;
        tables.assemble_prescription(row)
    }

    pub async fn update_prescription(
        &self,
        scope: &PrescriptionScope,
        fields: PrescriptionFields,
    ) -> StoreResult<Prescription> {
        let mut tables = self.tables.write().await;
        tables.resolve(Scope::Prescription(scope))?;
        tables.medication(fields.medication_id)?;
        let row = tables
            .prescriptions
            .get_mut(&scope.prescription_id)
            .ok_or_else(|| StoreError::not_found("Prescription", scope.prescription_id))?;
        row.fields = fields;
        let row = row.clone();
        tables.assemble_prescription(&row)
    }

    pub async fn delete_prescription(&self, scope: &PrescriptionScope) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.resolve(Scope::Prescription(scope))?;
        tables.prescriptions.remove(&scope.prescription_id);
        if let Some(ids) = tables.prescriptions_by_visit.get_mut(&scope.visit_id) {
            ids.remove(&scope.prescription_id);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Medications
    // ---------------------------------------------------------------------

    pub async fn create_medication(&self, fields: MedicationFields) -> StoreResult<Medication> {
        let mut tables = self.tables.write().await;
        let id = advance(&mut tables.sequences.medications, "medications")?;
        let medication = fields.into_medication(id);
        tables.medications.insert(id, medication.clone());
        Ok(medication)
    }

    pub async fn list_medications(&self, request: PageRequest) -> Page<Medication> {
        let tables = self.tables.read().await;
        let items = tables.medications.page(request).cloned().collect();
        Page::new(items, tables.medications.len(), request)
    }

    pub async fn get_medication(&self, id: MedicationId) -> StoreResult<Medication> {
        self.tables.read().await.medication(id).cloned()
    }

    pub async fn update_medication(
        &self,
        id: MedicationId,
        fields: MedicationFields,
    ) -> StoreResult<Medication> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .medications
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Medication", id))?;
        *slot = fields.into_medication(id);
        Ok(slot.clone())
    }

    /// Refuses to delete a medication that is still prescribed.
    pub async fn delete_medication(&self, id: MedicationId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.medication(id)?;
        let in_use = tables
            .prescriptions
            .values()
            .filter(|row| row.fields.medication_id == id)
            .count();
        if in_use > 0 {
            return Err(StoreError::Conflict(format!(
                "Medication {} is referenced by {} prescription(s)",
                id, in_use
            )));
        }
        tables.medications.remove(&id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Appointments
    // ---------------------------------------------------------------------

    pub async fn create_appointment(&self, fields: AppointmentFields) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        tables.check_appointment_refs(&fields)?;
        let id = advance(&mut tables.sequences.appointments, "appointments")?;
        let appointment = appointment_from(id, fields);
        tables.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    pub async fn list_appointments(&self, request: PageRequest) -> Page<Appointment> {
        let tables = self.tables.read().await;
        let items = tables.appointments.page(request).cloned().collect();
        Page::new(items, tables.appointments.len(), request)
    }

    pub async fn get_appointment(&self, id: AppointmentId) -> StoreResult<Appointment> {
        let tables = self.tables.read().await;
        tables
            .appointments
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Appointment", id))
    }

    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        fields: AppointmentFields,
    ) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains(&id) {
            return Err(StoreError::not_found("Appointment", id));
        }
        tables.check_appointment_refs(&fields)?;
        let appointment = appointment_from(id, fields);
        if let Some(slot) = tables.appointments.get_mut(&id) {
            *slot = appointment.clone();
        }
        Ok(appointment)
    }

    pub async fn delete_appointment(&self, id: AppointmentId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .appointments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Appointment", id))
    }

    pub async fn list_appointments_for_doctor(
        &self,
        doctor_id: &str,
        request: PageRequest,
    ) -> StoreResult<Page<Appointment>> {
        let tables = self.tables.read().await;
        let doctor_id = tables.doctor(&doctor_id.to_string())?.id.clone();
        let matching: Vec<&Appointment> = tables
            .appointments
            .values()
            .filter(|appointment| appointment.doctor_id == doctor_id)
            .collect();
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(request.offset())
            .take(request.limit)
            .cloned()
            .collect();
        Ok(Page::new(items, total, request))
    }

    /// Appointments of every patient whose contact number matches.
    pub async fn appointments_for_phone(&self, phone_number: &str) -> Vec<Appointment> {
        let tables = self.tables.read().await;
        let phone_number = phone_number.trim();
        let patient_ids: HashSet<&PatientId> = tables
            .patients
            .values()
            .filter(|row| row.fields.contact_number.trim() == phone_number)
            .map(|row| &row.id)
            .collect();
        if patient_ids.is_empty() {
            return Vec::new();
        }
        tables
            .appointments
            .values()
            .filter(|appointment| patient_ids.contains(&appointment.patient_id))
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Dashboard
    // ---------------------------------------------------------------------

    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;
        StoreStats {
            patients: tables.patients.len(),
            doctors: tables.doctors.len(),
            visits: tables.visits.len(),
            prescriptions: tables.prescriptions.len(),
            medications: tables.medications.len(),
            appointments: tables.appointments.len(),
        }
    }

    /// Visits at or after `now`, soonest first.
    pub async fn upcoming_visits(&self, now: DateTime<Utc>, limit: usize) -> StoreResult<Vec<Visit>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&VisitRow> = tables
            .visits
            .values()
            .filter(|row| row.fields.visit_time >= now)
            .collect();
        rows.sort_by_key(|row| (row.fields.visit_time, row.id));
        rows.into_iter()
            .take(limit)
            .map(|row| tables.assemble_visit(row))
            .collect()
    }

    pub async fn record_activity(
        &self,
        action: &str,
        description: String,
        user: String,
    ) -> StoreResult<ActivityEntry> {
        let mut tables = self.tables.write().await;
        tables.sequences.activity = tables
            .sequences
            .activity
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted("activity"))?;
        let entry = ActivityEntry {
            id: tables.sequences.activity,
            action: action.to_string(),
            description,
            timestamp: Utc::now(),
            user,
        };
        tables.push_activity(entry.clone(), self.activity_capacity);
        Ok(entry)
    }

    /// Newest first.
    pub async fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        let tables = self.tables.read().await;
        tables.activity.iter().take(limit).cloned().collect()
    }
}

fn appointment_from(id: AppointmentId, fields: AppointmentFields) -> Appointment {
    Appointment {
        id,
        patient_id: fields.patient_id,
        doctor_id: fields.doctor_id,
        appointment_type: fields.appointment_type,
        description: fields.description,
        from_date: fields.from_date,
        to_date: fields.to_date,
        appointment_status: fields.appointment_status,
    }
}
