pub mod register;
pub mod verify_otp;

pub use register::{register, RegisterOutcome};
pub use verify_otp::{verify_otp, VerifyOtpOutcome};
