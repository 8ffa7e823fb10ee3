use shared_models::clinical::Doctor;
use shared_models::error::AppError;
use shared_utils::AppState;

pub struct DoctorService<'a> {
    state: &'a AppState,
}

impl<'a> DoctorService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.state.store.list_doctors().await
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, AppError> {
        Ok(self.state.store.get_doctor(doctor_id).await?)
    }
}
