//! Parent-chain resolution for nested resources.
//!
//! Every visit and prescription operation goes through [`Tables::resolve`]
//! first. A child that exists under a different parent resolves to
//! `NotFound`, exactly like a child that does not exist at all.

use serde::Deserialize;

use shared_models::clinical::{PatientId, PrescriptionId, VisitId};

use crate::error::{StoreError, StoreResult};
use crate::records::{PatientRow, PrescriptionRow, VisitRow};
use crate::store::Tables;

/// `/patients/{patient_id}/visits/{visit_id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisitScope {
    pub patient_id: PatientId,
    pub visit_id: VisitId,
}

/// `/patients/{patient_id}/visits/{visit_id}/prescriptions/{prescription_id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrescriptionScope {
    pub patient_id: PatientId,
    pub visit_id: VisitId,
    pub prescription_id: PrescriptionId,
}

impl PrescriptionScope {
    pub fn visit(&self) -> VisitScope {
        VisitScope {
            patient_id: self.patient_id.clone(),
            visit_id: self.visit_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'a> {
    Patient(&'a str),
    Visit(&'a VisitScope),
    Prescription(&'a PrescriptionScope),
}

/// The rows along a resolved chain; deeper levels are `None` when the
/// scope stopped above them.
pub(crate) struct Resolved<'t> {
    pub patient: &'t PatientRow,
    pub visit: Option<&'t VisitRow>,
    pub prescription: Option<&'t PrescriptionRow>,
}

impl Tables {
    pub(crate) fn resolve(&self, scope: Scope<'_>) -> StoreResult<Resolved<'_>> {
        let patient_id = match scope {
            Scope::Patient(id) => id,
            Scope::Visit(s) => s.patient_id.as_str(),
            Scope::Prescription(s) => s.patient_id.as_str(),
        };
        let patient = self
            .patients
            .get(&patient_id.to_string())
            .ok_or_else(|| StoreError::not_found("Patient", patient_id))?;

        let visit_id = match scope {
            Scope::Patient(_) => {
                return Ok(Resolved {
                    patient,
                    visit: None,
                    prescription: None,
                })
            }
            Scope::Visit(s) => s.visit_id,
            Scope::Prescription(s) => s.visit_id,
        };
        let visit = self
            .visits
            .get(&visit_id)
            .filter(|visit| visit.patient_id == patient.id)
            .ok_or_else(|| StoreError::not_found("Visit", visit_id))?;

        let prescription_id = match scope {
            Scope::Prescription(s) => s.prescription_id,
            _ => {
                return Ok(Resolved {
                    patient,
                    visit: Some(visit),
                    prescription: None,
                })
            }
        };
        let prescription = self
            .prescriptions
            .get(&prescription_id)
            .filter(|prescription| prescription.visit_id == visit.id)
            .ok_or_else(|| StoreError::not_found("Prescription", prescription_id))?;

        Ok(Resolved {
            patient,
            visit: Some(visit),
            prescription: Some(prescription),
        })
    }
}
