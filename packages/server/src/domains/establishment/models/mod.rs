pub mod master;
pub mod timing;

pub use master::EstablishmentMaster;
pub use timing::EstablishmentTiming;
