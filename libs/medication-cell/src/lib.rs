pub mod models;
pub mod handlers;
pub mod router;
pub mod service;

pub use models::*;
pub use router::*;
