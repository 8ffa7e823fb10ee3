use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, TimeZone, Utc};

use shared_database::{
    AppointmentFields, ClinicStore, MedicationFields, PatientFields, PrescriptionFields,
    PrescriptionScope, StoreError, VisitFields, VisitScope,
};
use shared_models::clinical::{Doctor, Gender};
use shared_models::pagination::PageRequest;
use shared_models::scheduling::{AppointmentStatus, AppointmentType};

fn doctor(id: &str, last_name: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        first_name: "Test".to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@hospital.com", last_name.to_lowercase()),
        specialization: "General Practice".to_string(),
        contact_number: "123-456-7890".to_string(),
    }
}

fn patient_fields(first_name: &str, phone: &str) -> PatientFields {
    PatientFields {
        first_name: first_name.to_string(),
        last_name: "Lee".to_string(),
        gender: Gender::Female,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: format!("{}@x.com", first_name.to_lowercase()),
        contact_number: phone.to_string(),
        address: None,
    }
}

fn visit_fields(diagnosis: &str) -> VisitFields {
    VisitFields {
        visit_time: Utc.with_ymd_and_hms(2025, 5, 12, 9, 30, 0).unwrap(),
        symptoms: "Cough".to_string(),
        treatment: "Rest".to_string(),
        diagnosis: diagnosis.to_string(),
        notes: String::new(),
    }
}

fn medication_fields(name: &str) -> MedicationFields {
    MedicationFields {
        name: name.to_string(),
        description: "Pain reliever".to_string(),
        dosage: "500mg".to_string(),
    }
}

fn prescription_fields(medication_id: i64) -> PrescriptionFields {
    PrescriptionFields {
        quantity: 10,
        instructions: "Twice daily".to_string(),
        duration: 5,
        medication_id,
    }
}

fn appointment_fields(patient_id: &str, doctor_id: &str) -> AppointmentFields {
    let from = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
    AppointmentFields {
        patient_id: patient_id.to_string(),
        doctor_id: doctor_id.to_string(),
        appointment_type: AppointmentType::Examination,
        description: None,
        from_date: from,
        to_date: from + Duration::minutes(30),
        appointment_status: AppointmentStatus::Waiting,
    }
}

async fn seeded_store() -> ClinicStore {
    let store = ClinicStore::new(50);
    store.seed_doctors(vec![doctor("1", "Smith"), doctor("2", "Johnson")]).await;
    store
}

#[tokio::test]
async fn created_patient_reads_back_field_for_field() {
    let store = seeded_store().await;
    let created = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    assert!(!created.id.is_empty());

    let fetched = store.get_patient(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.first_name, "Ann");
    assert_eq!(fetched.contact_number, "555-1");
}

#[tokio::test]
async fn patient_pages_split_fifteen_into_ten_and_five() {
    let store = seeded_store().await;
    for i in 0..15 {
        store.create_patient(patient_fields(&format!("P{}", i), "1")).await.unwrap();
    }

    let first = store.list_patients(PageRequest { page: 0, limit: 10 }).await;
    let second = store.list_patients(PageRequest { page: 1, limit: 10 }).await;
    let third = store.list_patients(PageRequest { page: 2, limit: 10 }).await;

    assert_eq!(first.items.len(), 10);
    assert_eq!(second.items.len(), 5);
    assert!(third.items.is_empty());
    assert_eq!(first.total, 15);
    assert_eq!(first.items[0].first_name, "P0");
    assert_eq!(second.items[4].first_name, "P14");

    let again = store.list_patients(PageRequest { page: 0, limit: 10 }).await;
    assert_eq!(again, first);
}

#[tokio::test]
async fn deleting_patient_cascades_to_visits_prescriptions_and_appointments() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let medication = store.create_medication(medication_fields("Paracetamol")).await.unwrap();
    let visit = store.create_visit(&patient.id, "1", visit_fields("Flu")).await.unwrap();
    let visit_scope = VisitScope { patient_id: patient.id.clone(), visit_id: visit.id };
    let prescription = store
        .create_prescription(&visit_scope, prescription_fields(medication.id))
        .await
        .unwrap();
    let appointment = store
        .create_appointment(appointment_fields(&patient.id, "1"))
        .await
        .unwrap();

    let summary = store.delete_patient(&patient.id).await.unwrap();
    assert_eq!(summary.visits, 1);
    assert_eq!(summary.prescriptions, 1);
    assert_eq!(summary.appointments, 1);

    assert_matches!(store.get_patient(&patient.id).await, Err(StoreError::NotFound { .. }));
    assert_matches!(store.get_visit(&visit_scope).await, Err(StoreError::NotFound { .. }));
    let prescription_scope = PrescriptionScope {
        patient_id: patient.id.clone(),
        visit_id: visit.id,
        prescription_id: prescription.id,
    };
    assert_matches!(
        store.get_prescription(&prescription_scope).await,
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(store.get_appointment(appointment.id).await, Err(StoreError::NotFound { .. }));

    let stats = store.stats().await;
    assert_eq!((stats.patients, stats.visits, stats.prescriptions), (0, 0, 0));
    assert_eq!(stats.medications, 1);
}

#[tokio::test]
async fn visit_update_keeps_identity_patient_and_doctor() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let visit = store.create_visit(&patient.id, "2", visit_fields("Flu")).await.unwrap();
    let scope = VisitScope { patient_id: patient.id.clone(), visit_id: visit.id };

    let updated = store.update_visit(&scope, visit_fields("Bronchitis")).await.unwrap();
    assert_eq!(updated.id, visit.id);
    assert_eq!(updated.diagnosis, "Bronchitis");
    assert_eq!(updated.patient, visit.patient);
    assert_eq!(updated.doctor.id, "2");

    let fetched = store.get_visit(&scope).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn visit_under_another_patient_is_not_found() {
    let store = seeded_store().await;
    let ann = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let bob = store.create_patient(patient_fields("Bob", "555-2")).await.unwrap();
    let visit = store.create_visit(&ann.id, "1", visit_fields("Flu")).await.unwrap();

    let wrong = VisitScope { patient_id: bob.id.clone(), visit_id: visit.id };
    assert_matches!(store.get_visit(&wrong).await, Err(StoreError::NotFound { entity: "Visit", .. }));
    assert_matches!(
        store.update_visit(&wrong, visit_fields("Hijacked")).await,
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(store.delete_visit(&wrong).await, Err(StoreError::NotFound { .. }));

    let right = VisitScope { patient_id: ann.id.clone(), visit_id: visit.id };
    assert_eq!(store.get_visit(&right).await.unwrap().diagnosis, "Flu");
}

#[tokio::test]
async fn prescription_under_another_visit_is_not_found() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let medication = store.create_medication(medication_fields("Paracetamol")).await.unwrap();
    let visit_a = store.create_visit(&patient.id, "1", visit_fields("A")).await.unwrap();
    let visit_b = store.create_visit(&patient.id, "1", visit_fields("B")).await.unwrap();
    let scope_a = VisitScope { patient_id: patient.id.clone(), visit_id: visit_a.id };
    let prescription = store
        .create_prescription(&scope_a, prescription_fields(medication.id))
        .await
        .unwrap();
    assert_eq!(prescription.patient_visit.id, visit_a.id);

    let via_b = PrescriptionScope {
        patient_id: patient.id.clone(),
        visit_id: visit_b.id,
        prescription_id: prescription.id,
    };
    assert_matches!(
        store.get_prescription(&via_b).await,
        Err(StoreError::NotFound { entity: "Prescription", .. })
    );
    assert_matches!(store.delete_prescription(&via_b).await, Err(StoreError::NotFound { .. }));
    assert_eq!(store.stats().await.prescriptions, 1);
}

#[tokio::test]
async fn deleting_visit_cascades_only_its_prescriptions() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let medication = store.create_medication(medication_fields("Paracetamol")).await.unwrap();
    let keep = store.create_visit(&patient.id, "1", visit_fields("Keep")).await.unwrap();
    let drop = store.create_visit(&patient.id, "1", visit_fields("Drop")).await.unwrap();
    let keep_scope = VisitScope { patient_id: patient.id.clone(), visit_id: keep.id };
    let drop_scope = VisitScope { patient_id: patient.id.clone(), visit_id: drop.id };
    store.create_prescription(&keep_scope, prescription_fields(medication.id)).await.unwrap();
    store.create_prescription(&drop_scope, prescription_fields(medication.id)).await.unwrap();
    store.create_prescription(&drop_scope, prescription_fields(medication.id)).await.unwrap();

    let summary = store.delete_visit(&drop_scope).await.unwrap();
    assert_eq!(summary.prescriptions, 2);

    let visits = store.list_visits(&patient.id, PageRequest { page: 0, limit: 10 }).await.unwrap();
    assert_eq!(visits.total, 1);
    let remaining = store
        .list_prescriptions(&keep_scope, PageRequest { page: 0, limit: 10 })
        .await
        .unwrap();
    assert_eq!(remaining.items.len(), 1);
}

#[tokio::test]
async fn ids_are_never_reused() {
    let store = seeded_store().await;
    let first = store.create_medication(medication_fields("A")).await.unwrap();
    store.delete_medication(first.id).await.unwrap();
    let second = store.create_medication(medication_fields("B")).await.unwrap();
    assert!(second.id > first.id);

    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();
    store.delete_patient(&patient.id).await.unwrap();
    let again = store.create_patient(patient_fields("Ann", "1")).await.unwrap();
    assert_ne!(again.id, patient.id);
}

#[tokio::test]
async fn prescribed_medication_cannot_be_deleted() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();
    let medication = store.create_medication(medication_fields("Amoxicillin")).await.unwrap();
    let visit = store.create_visit(&patient.id, "1", visit_fields("Infection")).await.unwrap();
    let scope = VisitScope { patient_id: patient.id.clone(), visit_id: visit.id };
    store.create_prescription(&scope, prescription_fields(medication.id)).await.unwrap();

    assert_matches!(store.delete_medication(medication.id).await, Err(StoreError::Conflict(_)));
    assert!(store.get_medication(medication.id).await.is_ok());
}

#[tokio::test]
async fn references_must_exist() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();

    assert_matches!(
        store.create_visit(&patient.id, "99", visit_fields("Flu")).await,
        Err(StoreError::NotFound { entity: "Doctor", .. })
    );
    assert_matches!(
        store.create_visit("missing", "1", visit_fields("Flu")).await,
        Err(StoreError::NotFound { entity: "Patient", .. })
    );

    let visit = store.create_visit(&patient.id, "1", visit_fields("Flu")).await.unwrap();
    let scope = VisitScope { patient_id: patient.id.clone(), visit_id: visit.id };
    assert_matches!(
        store.create_prescription(&scope, prescription_fields(42)).await,
        Err(StoreError::NotFound { entity: "Medication", .. })
    );
    assert_matches!(
        store.create_appointment(appointment_fields("missing", "1")).await,
        Err(StoreError::NotFound { entity: "Patient", .. })
    );
    assert_eq!(store.stats().await.appointments, 0);
}

#[tokio::test]
async fn concurrent_visit_creation_never_orphans_under_deleted_patient() {
    let store = Arc::new(seeded_store().await);
    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        let patient_id = patient.id.clone();
        handles.push(tokio::spawn(async move {
            store.create_visit(&patient_id, "1", visit_fields(&format!("V{}", i))).await
        }));
    }
    let deleter = {
        let store = store.clone();
        let patient_id = patient.id.clone();
        tokio::spawn(async move { store.delete_patient(&patient_id).await })
    };

    for handle in handles {
        let outcome = handle.await.unwrap();
        if let Err(e) = outcome {
            assert_matches!(e, StoreError::NotFound { entity: "Patient", .. });
        }
    }
    deleter.await.unwrap().unwrap();

    assert_eq!(store.stats().await.visits, 0);
    assert_matches!(
        store.list_visits(&patient.id, PageRequest { page: 0, limit: 10 }).await,
        Err(StoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn appointment_lookups_by_doctor_and_phone() {
    let store = seeded_store().await;
    let ann = store.create_patient(patient_fields("Ann", "555-1")).await.unwrap();
    let bob = store.create_patient(patient_fields("Bob", "555-2")).await.unwrap();
    for _ in 0..3 {
        store.create_appointment(appointment_fields(&ann.id, "1")).await.unwrap();
    }
    store.create_appointment(appointment_fields(&bob.id, "2")).await.unwrap();

    let page = store
        .list_appointments_for_doctor("1", PageRequest { page: 1, limit: 2 })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_matches!(
        store.list_appointments_for_doctor("77", PageRequest { page: 0, limit: 2 }).await,
        Err(StoreError::NotFound { entity: "Doctor", .. })
    );

    let by_phone = store.appointments_for_phone(" 555-2 ").await;
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].patient_id, bob.id);
    assert!(store.appointments_for_phone("000").await.is_empty());
}

#[tokio::test]
async fn upcoming_visits_are_sorted_and_exclude_the_past() {
    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();
    let now = Utc.with_ymd_and_hms(2025, 5, 12, 12, 0, 0).unwrap();
    for hours in [5, -2, 1, 3] {
        let mut fields = visit_fields(&format!("{}h", hours));
        fields.visit_time = now + Duration::hours(hours);
        store.create_visit(&patient.id, "1", fields).await.unwrap();
    }

    let upcoming = store.upcoming_visits(now, 2).await.unwrap();
    let diagnoses: Vec<_> = upcoming.iter().map(|v| v.diagnosis.as_str()).collect();
    assert_eq!(diagnoses, vec!["1h", "3h"]);
}

#[tokio::test]
async fn activity_feed_is_newest_first_and_capped() {
    let store = ClinicStore::new(3);
    for i in 0..5 {
        store
            .record_activity("Patient Added", format!("entry {}", i), "Receptionist".to_string())
            .await
            .unwrap();
    }
    let recent = store.recent_activity(10).await;
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].description, "entry 4");
    assert_eq!(recent[2].description, "entry 2");
}

#[tokio::test]
async fn snapshot_round_trip_preserves_rows_and_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.json");

    let store = seeded_store().await;
    let patient = store.create_patient(patient_fields("Ann", "1")).await.unwrap();
    let visit = store.create_visit(&patient.id, "1", visit_fields("Flu")).await.unwrap();
    store.save_snapshot(&path).await.unwrap();

    let restored = ClinicStore::load_snapshot(&path, 50).await.unwrap();
    let scope = VisitScope { patient_id: patient.id.clone(), visit_id: visit.id };
    assert_eq!(restored.get_visit(&scope).await.unwrap(), visit);
    assert_eq!(restored.list_doctors().await.len(), 2);

    let next = restored.create_visit(&patient.id, "1", visit_fields("Cold")).await.unwrap();
    assert!(next.id > visit.id);
}

#[tokio::test]
async fn missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ClinicStore::load_snapshot(&dir.path().join("absent.json"), 10).await.unwrap();
    assert_eq!(store.stats().await.patients, 0);
}
