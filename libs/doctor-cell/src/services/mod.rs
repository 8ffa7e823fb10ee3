pub mod doctor;
pub mod roster;

pub use doctor::DoctorService;
