use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clinical::{DoctorId, PatientId};

pub type AppointmentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    ReExamination,
    Surgery,
    GetResults,
    Examination,
    GetTestResults,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::ReExamination => write!(f, "RE_EXAMINATION"),
            AppointmentType::Surgery => write!(f, "SURGERY"),
            AppointmentType::GetResults => write!(f, "GET_RESULTS"),
            AppointmentType::Examination => write!(f, "EXAMINATION"),
            AppointmentType::GetTestResults => write!(f, "GET_TEST_RESULTS"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Waiting,
    Confirmed,
    Rejected,
    Completed,
    Canceled,
    Expired,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Waiting => write!(f, "WAITING"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AppointmentStatus::Rejected => write!(f, "REJECTED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Canceled => write!(f, "CANCELED"),
            AppointmentStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub appointment_type: AppointmentType,
    pub description: Option<String>,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    pub appointment_status: AppointmentStatus,
}
