//! Coded enums shared with the mobile/web clients.
//!
//! These are wire values persisted in the database; do not renumber.

/// Account role tags
pub mod user_type {
    pub const PATIENT: i32 = 1;
    pub const DOCTOR: i32 = 2;
    pub const HOSPITAL: i32 = 3;
}

/// Purpose tag carried by a session token
pub mod token_type {
    pub const LOGIN: i32 = 1;
    pub const REFRESH: i32 = 2;
    pub const APPOINTMENT: i32 = 3;
}

/// Profile completion steps
pub mod profile_step {
    pub const SECTION_A: i32 = 1;
    pub const SECTION_B: i32 = 2;
    pub const COMPLETED: i32 = 3;
}

/// Profile verification status
pub mod profile_status {
    pub const PENDING: i32 = 1;
    pub const APPROVED: i32 = 2;
    pub const REJECTED: i32 = 3;
}

/// Gender codes
pub mod gender {
    pub const MALE: i32 = 1;
    pub const FEMALE: i32 = 2;
    pub const OTHER: i32 = 3;
}

/// Default account status (active)
pub const DEFAULT_STATUS: i32 = 2;

pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Placeholder for missing values in list projections
pub const NA: &str = "N/A";

/// Provider-side SMS template id for the OTP message
pub const OTP_TEMPLATE_SID: &str = "9735";

/// "Today" filter marker for the doctor patient list
pub const PATIENT_LIST_TODAY: &str = "TODAY";

/// Map the gender string from registration payloads to its wire code.
pub fn gender_code(raw: &str) -> i32 {
    match raw.trim().to_lowercase().as_str() {
        "male" => gender::MALE,
        "female" => gender::FEMALE,
        _ => gender::OTHER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_code() {
        assert_eq!(gender_code("male"), gender::MALE);
        assert_eq!(gender_code("female"), gender::FEMALE);
        assert_eq!(gender_code("Female"), gender::FEMALE);
        assert_eq!(gender_code("other"), gender::OTHER);
        assert_eq!(gender_code("unknown"), gender::OTHER);
    }
}
