pub mod doctor;
pub mod hospital;
pub mod patient;
pub mod profile;
pub mod user;

pub use doctor::{Doctor, Education};
pub use hospital::Hospital;
pub use patient::Patient;
pub use profile::ProfileSummary;
pub use user::{normalize_phone, User, UserProjection};
