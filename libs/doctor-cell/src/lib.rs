pub mod handlers;
pub mod router;
pub mod services;

pub use router::*;
pub use services::roster::{builtin_roster, load_roster, RosterError};
