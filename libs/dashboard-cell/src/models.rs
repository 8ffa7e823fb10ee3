use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_database::StoreStats;
use shared_models::clinical::{Visit, VisitId};
use shared_models::error::AppError;

pub const DEFAULT_WIDGET_LIMIT: usize = 5;

/// `?limit=` on the activity and upcoming-visit widgets.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WidgetQuery {
    pub limit: Option<usize>,
}

impl WidgetQuery {
    pub fn resolve(self, max: usize) -> Result<usize, AppError> {
        match self.limit {
            None => Ok(DEFAULT_WIDGET_LIMIT.min(max)),
            Some(0) => Err(AppError::ValidationError(
                "limit must be a positive integer".to_string(),
            )),
            Some(limit) => Ok(limit.min(max)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_visits: usize,
    pub total_prescriptions: usize,
    pub total_medications: usize,
    pub total_appointments: usize,
}

impl From<StoreStats> for DashboardStats {
    fn from(stats: StoreStats) -> Self {
        Self {
            total_patients: stats.patients,
            total_visits: stats.visits,
            total_prescriptions: stats.prescriptions,
            total_medications: stats.medications,
            total_appointments: stats.appointments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingVisit {
    pub id: VisitId,
    pub patient_name: String,
    pub doctor_name: String,
    pub visit_time: DateTime<Utc>,
}

impl From<Visit> for UpcomingVisit {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            patient_name: visit.patient.full_name(),
            doctor_name: visit.doctor.display_name(),
            visit_time: visit.visit_time,
        }
    }
}
