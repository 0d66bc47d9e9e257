// Business domains. Each domain keeps its SQL in models/ and its flows in
// actions/; route handlers stay thin.

pub mod auth;
pub mod doctor;
pub mod establishment;
pub mod registration;
pub mod user;
