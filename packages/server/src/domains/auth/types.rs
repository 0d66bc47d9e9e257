//! Request payloads for the auth flows.

use serde::Deserialize;

use crate::common::constants::DEFAULT_COUNTRY_CODE;
use crate::common::ApiError;
use crate::domains::auth::DeviceMeta;

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

/// Login payload: phone or email plus password and role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub user_type: i32,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(flatten)]
    pub device: DeviceMeta,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut problems = Vec::new();

        if self.phone.is_none() && self.email.is_none() {
            problems.push("either phone or email must be provided".to_string());
        }
        if let Some(phone) = &self.phone {
            if !is_valid_phone(&crate::domains::user::models::normalize_phone(phone)) {
                problems.push("phone must be 10 digits".to_string());
            }
        }
        if let Some(email) = &self.email {
            if !is_plausible_email(email) {
                problems.push("email must be a valid email address".to_string());
            }
        }
        if self.password.trim().len() < 6 {
            problems.push("password must be at least 6 characters".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(problems.join(",")))
        }
    }
}

/// Logout payload. The token can also arrive via header, query or cookie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutBody {
    pub token: Option<String>,
    pub device_id: Option<String>,
}

/// 10-digit numeric phone (after normalization).
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Cheap shape check; real validation is deliverability, which we don't do.
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> LoginRequest {
        LoginRequest {
            phone: Some("9876543210".to_string()),
            email: None,
            password: "secret1".to_string(),
            user_type: 2,
            country_code: "+91".to_string(),
            device: DeviceMeta::default(),
        }
    }

    #[test]
    fn test_valid_phone_login() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_requires_phone_or_email() {
        let mut req = base_request();
        req.phone = None;
        assert!(req.validate().is_err());

        req.email = Some("doc@example.com".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        let mut req = base_request();
        req.password = "12345".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_phone_shape() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432100"));
        assert!(!is_valid_phone("98765x3210"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("doc@example.com"));
        assert!(!is_plausible_email("docexample.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("doc@com"));
    }
}
