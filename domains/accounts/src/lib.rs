//! Accounts domain: registration, login, current principal

pub mod api;
pub mod domain;

pub use domain::credentials::{login, register, Registration, Session};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
