pub mod login;
pub mod logout;

pub use login::{login, LoginOutcome};
pub use logout::{logout, LogoutInput, LogoutSummary};
