pub mod patient_list;

pub use patient_list::{patient_list, PatientGroup, PatientListOutcome};
