pub mod prescription;
pub mod visit;

pub use prescription::PrescriptionService;
pub use visit::VisitService;
