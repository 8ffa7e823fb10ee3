use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::ClinicStore;
use shared_models::clinical::Doctor;

use crate::state::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub auth_required: bool,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            auth_required: false,
            default_page_limit: 10,
            max_page_limit: 100,
        }
    }
}

impl TestConfig {
    pub fn requiring_auth() -> Self {
        Self {
            auth_required: true,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            jwt_secret: self.jwt_secret.clone(),
            auth_required: self.auth_required,
            default_page_limit: self.default_page_limit,
            max_page_limit: self.max_page_limit,
            ..AppConfig::default()
        }
    }

    /// State over a fresh store seeded with [`test_doctors`].
    pub async fn to_state(&self) -> AppState {
        let config = self.to_app_config();
        let store = ClinicStore::new(config.activity_log_capacity);
        store.seed_doctors(test_doctors()).await;
        AppState::new(config, store)
    }
}

pub fn test_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "doc-1".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john.smith@hospital.com".to_string(),
            specialization: "Cardiology".to_string(),
            contact_number: "123-456-7890".to_string(),
        },
        Doctor {
            id: "doc-2".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Johnson".to_string(),
            email: "sarah.johnson@hospital.com".to_string(),
            specialization: "Neurology".to_string(),
            contact_number: "123-456-7891".to_string(),
        },
    ]
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "receptionist".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn receptionist(email: &str) -> Self {
        Self::new(email, "receptionist")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid test request"),
        None => builder.body(Body::empty()).expect("valid test request"),
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub fn sample_patient_body(first_name: &str, contact_number: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Lee",
        "gender": "FEMALE",
        "dateOfBirth": "1990-01-01",
        "email": format!("{}@x.com", first_name.to_lowercase()),
        "contactNumber": contact_number
    })
}
