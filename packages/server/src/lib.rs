// Medibook - healthcare booking backend
//
// Thin HTTP layer over Postgres: user/doctor registration with phone+OTP
// verification, login/logout session management, and the doctor patient-list
// query. All SQL lives in domains/*/models; flows live in domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
