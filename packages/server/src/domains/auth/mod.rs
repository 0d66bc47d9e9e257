pub mod actions;
pub mod jwt;
pub mod models;
pub mod password;
pub mod types;

pub use jwt::{Claims, DeviceMeta, JwtService};
pub use models::Session;
