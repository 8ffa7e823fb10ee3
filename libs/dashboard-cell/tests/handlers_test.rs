use axum::http::{Method, StatusCode};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;
use tower::ServiceExt;

use dashboard_cell::dashboard_routes;
use shared_database::{MedicationFields, PatientFields, VisitFields};
use shared_models::auth::Session;
use shared_models::clinical::Gender;
use shared_utils::test_utils::{json_request, read_json, TestConfig};
use shared_utils::AppState;

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let response = dashboard_routes(state.clone())
        .oneshot(json_request(Method::GET, uri, None))
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

fn patient(first_name: &str) -> PatientFields {
    PatientFields {
        first_name: first_name.to_string(),
        last_name: "Lee".to_string(),
        gender: Gender::Female,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: format!("{}@x.com", first_name.to_lowercase()),
        contact_number: "555-1".to_string(),
        address: None,
    }
}

fn visit_at(offset: Duration) -> VisitFields {
    VisitFields {
        visit_time: Utc::now() + offset,
        symptoms: "Headache".to_string(),
        treatment: String::new(),
        diagnosis: "Migraine".to_string(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn stats_reflect_the_store() {
    let state = TestConfig::default().to_state().await;
    let ann = state.store.create_patient(patient("Ann")).await.unwrap();
    state.store.create_patient(patient("Bo")).await.unwrap();
    state
        .store
        .create_visit(&ann.id, "doc-1", visit_at(Duration::hours(2)))
        .await
        .unwrap();
    state
        .store
        .create_medication(MedicationFields {
            name: "Ibuprofen".to_string(),
            description: String::new(),
            dosage: "200mg".to_string(),
        })
        .await
        .unwrap();

    let (status, stats) = get(&state, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalPatients"], 2);
    assert_eq!(stats["totalVisits"], 1);
    assert_eq!(stats["totalPrescriptions"], 0);
    assert_eq!(stats["totalMedications"], 1);
    assert_eq!(stats["totalAppointments"], 0);
}

#[tokio::test]
async fn upcoming_visits_skip_the_past() {
    let state = TestConfig::default().to_state().await;
    let ann = state.store.create_patient(patient("Ann")).await.unwrap();
    for offset in [Duration::hours(-3), Duration::days(2), Duration::hours(1)] {
        state
            .store
            .create_visit(&ann.id, "doc-2", visit_at(offset))
            .await
            .unwrap();
    }

    let (status, upcoming) = get(&state, "/upcoming-visits").await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = upcoming.as_array().unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0]["id"], 3);
    assert_eq!(upcoming[0]["patientName"], "Ann Lee");
    assert_eq!(upcoming[0]["doctorName"], "Dr. Sarah Johnson");

    let (_, limited) = get(&state, "/upcoming-visits?limit=1").await;
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn activity_is_newest_first() {
    let state = TestConfig::default().to_state().await;
    let session = Session::anonymous();
    for i in 0..7 {
        state
            .record_activity(&session, "Patient Added", format!("patient {}", i))
            .await;
    }

    let (status, activity) = get(&state, "/activity").await;
    assert_eq!(status, StatusCode::OK);
    let activity = activity.as_array().unwrap();
    assert_eq!(activity.len(), 5);
    assert_eq!(activity[0]["description"], "patient 6");

    let (status, _) = get(&state, "/activity?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
