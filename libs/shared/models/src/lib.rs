pub mod activity;
pub mod auth;
pub mod clinical;
pub mod error;
pub mod pagination;
pub mod scheduling;
