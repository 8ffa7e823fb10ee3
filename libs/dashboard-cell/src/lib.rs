pub mod models;
pub mod handlers;
pub mod router;

pub use models::*;
pub use router::*;
