use axum::http::{Method, StatusCode};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tower::ServiceExt;

use medication_cell::medication_routes;
use shared_database::{PatientFields, PrescriptionFields, VisitFields, VisitScope};
use shared_models::clinical::Gender;
use shared_models::pagination::PageRequest;
use shared_utils::pagination::TOTAL_COUNT_HEADER;
use shared_utils::test_utils::{json_request, read_json, TestConfig};

fn amoxicillin() -> serde_json::Value {
    json!({ "name": "Amoxicillin", "description": "Antibiotic", "dosage": "500mg" })
}

#[tokio::test]
async fn medication_crud() {
    let state = TestConfig::default().to_state().await;
    let app = medication_routes(state);

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/", Some(amoxicillin())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/{}", id),
            Some(json!({ "name": "Amoxicillin", "dosage": "250mg" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["dosage"], "250mg");
    assert_eq!(updated["description"], "");

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/", None))
        .await
        .unwrap();
    assert_eq!(response.headers()[TOTAL_COUNT_HEADER], "1");

    let response = app
        .clone()
        .oneshot(json_request(Method::DELETE, &format!("/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(Method::GET, &format!("/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_dosage_is_a_bad_request() {
    let state = TestConfig::default().to_state().await;
    let response = medication_routes(state)
        .oneshot(json_request(Method::POST, "/", Some(json!({ "name": "Ibuprofen" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let state = TestConfig::default().to_state().await;
    let response = medication_routes(state)
        .oneshot(json_request(Method::GET, "/abc", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn prescribed_medication_cannot_be_deleted() {
    let state = TestConfig::default().to_state().await;
    let app = medication_routes(state.clone());

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/", Some(amoxicillin())))
        .await
        .unwrap();
    let medication_id = read_json(response).await["id"].as_i64().unwrap();

    let patient = state
        .store
        .create_patient(PatientFields {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: "ann@x.com".to_string(),
            contact_number: "555-1".to_string(),
            address: None,
        })
        .await
        .unwrap();
    let visit = state
        .store
        .create_visit(
            &patient.id,
            "doc-1",
            VisitFields {
                visit_time: Utc::now(),
                symptoms: "Fever".to_string(),
                treatment: String::new(),
                diagnosis: "Infection".to_string(),
                notes: String::new(),
            },
        )
        .await
        .unwrap();
    let scope = VisitScope {
        patient_id: patient.id.clone(),
        visit_id: visit.id,
    };
    state
        .store
        .create_prescription(
            &scope,
            PrescriptionFields {
                quantity: 14,
                instructions: "Twice daily".to_string(),
                duration: 7,
                medication_id,
            },
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(Method::DELETE, &format!("/{}", medication_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(json_request(Method::GET, &format!("/{}", medication_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_additions_are_logged_in_commit_order() {
    let state = TestConfig::default().to_state().await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let app = medication_routes(state.clone());
        tasks.push(tokio::spawn(async move {
            let body = json!({ "name": format!("Drug {}", i), "dosage": "10mg" });
            let response = app
                .oneshot(json_request(Method::POST, "/", Some(body)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut medications = state
        .store
        .list_medications(PageRequest { page: 0, limit: 100 })
        .await
        .items;
    medications.sort_by_key(|medication| medication.id);
    let committed: Vec<String> = medications
        .iter()
        .map(|medication| format!("{} {} added to the formulary", medication.name, medication.dosage))
        .collect();

    let logged: Vec<String> = state
        .store
        .recent_activity(100)
        .await
        .into_iter()
        .rev()
        .filter(|entry| entry.action == "Medication Added")
        .map(|entry| entry.description)
        .collect();

    assert_eq!(committed.len(), 20);
    assert_eq!(logged, committed);
}
