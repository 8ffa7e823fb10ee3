pub mod error;
pub mod records;
pub mod scope;
pub mod snapshot;
pub mod store;
pub mod table;

pub use error::{StoreError, StoreResult};
pub use records::*;
pub use scope::{PrescriptionScope, VisitScope};
pub use store::ClinicStore;
