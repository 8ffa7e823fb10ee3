//! The doctor roster. Doctors are not managed through the API; they are
//! seeded once at startup, either from a JSON file or from the built-in list.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use shared_models::clinical::Doctor;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read doctor roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Doctor roster {path} is not a valid JSON array of doctors: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Doctor roster {0} is empty")]
    Empty(String),

    #[error("Doctor roster lists id {0} more than once")]
    DuplicateId(String),
}

/// Reads the roster at `path`, or returns [`builtin_roster`] when unset.
pub async fn load_roster(path: Option<&Path>) -> Result<Vec<Doctor>, RosterError> {
    let Some(path) = path else {
        info!("Using built-in doctor roster");
        return Ok(builtin_roster());
    };

    let roster_path = path.display().to_string();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RosterError::Io {
            path: roster_path.clone(),
            source,
        })?;
    let doctors: Vec<Doctor> = serde_json::from_str(&raw).map_err(|source| RosterError::Parse {
        path: roster_path.clone(),
        source,
    })?;

    if doctors.is_empty() {
        return Err(RosterError::Empty(roster_path));
    }
    let mut seen = HashSet::new();
    for doctor in &doctors {
        if !seen.insert(doctor.id.as_str()) {
            return Err(RosterError::DuplicateId(doctor.id.clone()));
        }
    }

    info!("Loaded {} doctors from {}", doctors.len(), roster_path);
    Ok(doctors)
}

pub fn builtin_roster() -> Vec<Doctor> {
    [
        ("1", "John", "Smith", "Cardiology", "123-456-7890"),
        ("2", "Sarah", "Johnson", "Neurology", "123-456-7891"),
        ("3", "Michael", "Brown", "Pediatrics", "123-456-7892"),
    ]
    .into_iter()
    .map(|(id, first_name, last_name, specialization, contact_number)| Doctor {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@hospital.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        specialization: specialization.to_string(),
        contact_number: contact_number.to_string(),
    })
    .collect()
}
