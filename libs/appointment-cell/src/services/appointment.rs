use tracing::{debug, info};

use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};
use shared_models::scheduling::{Appointment, AppointmentId};
use shared_utils::AppState;

use crate::models::AppointmentDraft;

pub struct AppointmentService<'a> {
    state: &'a AppState,
}

impl<'a> AppointmentService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn book_appointment(
        &self,
        draft: AppointmentDraft,
        session: &Session,
    ) -> Result<Appointment, AppError> {
        let fields = draft.validate()?;
        debug!(
            "Booking {} for patient {} with doctor {}",
            fields.appointment_type, fields.patient_id, fields.doctor_id
        );

        let appointment = self
            .state
            .commit(
                session,
                "Appointment Booked",
                self.state.store.create_appointment(fields),
                |appointment: &Appointment| {
                    format!(
                        "{} booked for {}",
                        appointment.appointment_type,
                        appointment.from_date.format("%Y-%m-%d %H:%M")
                    )
                },
            )
            .await?;
        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn list_appointments(&self, request: PageRequest) -> Page<Appointment> {
        self.state.store.list_appointments(request).await
    }

    pub async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, AppError> {
        Ok(self.state.store.get_appointment(id).await?)
    }

    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        draft: AppointmentDraft,
        session: &Session,
    ) -> Result<Appointment, AppError> {
        let fields = draft.validate()?;
        self.state
            .commit(
                session,
                "Appointment Updated",
                self.state.store.update_appointment(id, fields),
                |appointment: &Appointment| {
                    format!("Appointment {} is now {}", appointment.id, appointment.appointment_status)
                },
            )
            .await
    }

    pub async fn delete_appointment(
        &self,
        id: AppointmentId,
        session: &Session,
    ) -> Result<(), AppError> {
        self.state
            .commit(
                session,
                "Appointment Removed",
                self.state.store.delete_appointment(id),
                |_: &()| format!("Appointment {} was removed", id),
            )
            .await
    }

    pub async fn doctor_appointments(
        &self,
        doctor_id: &str,
        request: PageRequest,
    ) -> Result<Page<Appointment>, AppError> {
        Ok(self
            .state
            .store
            .list_appointments_for_doctor(doctor_id, request)
            .await?)
    }

    pub async fn appointments_by_phone(&self, phone_number: &str) -> Vec<Appointment> {
        debug!("Looking up appointments by phone number");
        self.state.store.appointments_for_phone(phone_number).await
    }
}
