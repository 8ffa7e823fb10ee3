use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub iat: Option<u64>,
}

/// Front-desk staff roles offered by the dashboard's role selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Receptionist,
    Doctor,
    Admin,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Receptionist => write!(f, "Receptionist"),
            StaffRole::Doctor => write!(f, "Doctor"),
            StaffRole::Admin => write!(f, "Administrator"),
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receptionist" => Ok(StaffRole::Receptionist),
            "doctor" => Ok(StaffRole::Doctor),
            "admin" | "administrator" => Ok(StaffRole::Admin),
            other => Err(format!("Unknown staff role: {}", other)),
        }
    }
}

/// Who is making the request. Built once per request by the session
/// middleware and handed to handlers as an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: StaffRole,
    pub issued_at: Option<DateTime<Utc>>,
}

impl Session {
    pub const ANONYMOUS_USER_ID: &'static str = "front-desk";

    /// Session used when authentication is optional and no token was sent.
    pub fn anonymous() -> Self {
        Self {
            user_id: Self::ANONYMOUS_USER_ID.to_string(),
            email: None,
            display_name: None,
            role: StaffRole::Receptionist,
            issued_at: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id == Self::ANONYMOUS_USER_ID
    }

    /// Name shown in the activity feed.
    pub fn actor(&self) -> String {
        match (&self.display_name, &self.email) {
            (Some(name), _) => name.clone(),
            (None, Some(email)) => email.clone(),
            (None, None) => self.role.to_string(),
        }
    }
}
