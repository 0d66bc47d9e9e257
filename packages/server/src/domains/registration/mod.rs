pub mod actions;
pub mod models;
pub mod otp;
pub mod types;

pub use models::OtpRecord;
pub use types::{RegisterRequest, VerifyOtpRequest};
