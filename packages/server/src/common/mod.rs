// Common types and utilities shared across the application

pub mod constants;
pub mod error;
pub mod pagination;
pub mod response;

pub use error::ApiError;
pub use pagination::{get_pagination, Pagination, SortOrder};
pub use response::MsgCode;
