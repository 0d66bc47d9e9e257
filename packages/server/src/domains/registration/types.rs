//! Request payloads for registration and OTP verification.

use serde::Deserialize;

use crate::common::constants::{user_type, DEFAULT_COUNTRY_CODE};
use crate::common::ApiError;
use crate::domains::auth::types::{is_plausible_email, is_valid_phone};
use crate::domains::auth::DeviceMeta;
use crate::domains::user::models::Education;

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

/// Registration payload. Doctor-specific fields are optional at the type
/// level and enforced by `validate` when `user_type` is doctor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    pub user_type: i32,
    pub password: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub experience: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut problems = Vec::new();

        if self.full_name.trim().is_empty() {
            problems.push("fullName is required".to_string());
        }
        if !is_valid_phone(&crate::domains::user::models::normalize_phone(&self.phone)) {
            problems.push("phone must be 10 digits".to_string());
        }
        if self.password.trim().len() < 6 {
            problems.push("password must be at least 6 characters".to_string());
        }
        if !matches!(
            self.user_type,
            user_type::PATIENT | user_type::DOCTOR | user_type::HOSPITAL
        ) {
            problems.push("userType must be 1, 2 or 3".to_string());
        }
        if let Some(email) = &self.email {
            if !is_plausible_email(email) {
                problems.push("email must be a valid email address".to_string());
            }
        }
        if self.user_type == user_type::DOCTOR && self.email.is_none() {
            problems.push("email is required for doctors".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(problems.join(",")))
        }
    }
}

/// OTP verification payload; identifies the pending user by phone + role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    pub user_type: i32,
    pub otp: String,
    #[serde(flatten)]
    pub device: DeviceMeta,
}

impl VerifyOtpRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut problems = Vec::new();

        if !is_valid_phone(&crate::domains::user::models::normalize_phone(&self.phone)) {
            problems.push("phone must be 10 digits".to_string());
        }
        if self.otp.trim().is_empty() {
            problems.push("otp is required".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(problems.join(",")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_register() -> RegisterRequest {
        RegisterRequest {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            country_code: "+91".to_string(),
            user_type: user_type::PATIENT,
            password: "secret1".to_string(),
            email: None,
            gender: None,
            city: None,
            state: None,
            experience: None,
            specialization: None,
            education: Vec::new(),
        }
    }

    #[test]
    fn test_patient_register_minimal() {
        assert!(base_register().validate().is_ok());
    }

    #[test]
    fn test_doctor_requires_email() {
        let mut req = base_register();
        req.user_type = user_type::DOCTOR;
        assert!(req.validate().is_err());

        req.email = Some("doc@example.com".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_dashed_phone_passes_after_normalization() {
        let mut req = base_register();
        req.phone = "98765-43210".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_role() {
        let mut req = base_register();
        req.user_type = 9;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_verify_otp_requires_code() {
        let req = VerifyOtpRequest {
            phone: "9876543210".to_string(),
            country_code: "+91".to_string(),
            user_type: user_type::PATIENT,
            otp: "".to_string(),
            device: DeviceMeta::default(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_verify_otp_payload_parses_camel_case() {
        let req: VerifyOtpRequest = serde_json::from_value(serde_json::json!({
            "phone": "9876543210",
            "userType": 2,
            "otp": "1234",
            "deviceId": "device-42"
        }))
        .unwrap();
        assert_eq!(req.country_code, "+91");
        assert_eq!(req.device.device_id.as_deref(), Some("device-42"));
    }
}
