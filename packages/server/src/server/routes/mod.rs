pub mod auth;
pub mod doctor;
pub mod health;
pub mod registration;

pub use auth::{login_handler, logout_handler};
pub use doctor::patient_list_handler;
pub use health::health_handler;
pub use registration::{register_handler, verify_otp_handler};
