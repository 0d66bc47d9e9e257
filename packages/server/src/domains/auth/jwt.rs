use anyhow::Result;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::constants::token_type;

/// Device fingerprint captured when a token is issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
}

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: Uuid,
    pub user_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Purpose tag (login vs appointment-scoped); absent on plain tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<i32>,
    #[serde(flatten)]
    pub device: DeviceMeta,
    pub exp: i64,
    pub iat: i64,
}

/// JWT Service - creates and verifies signed session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    /// Create new JWT service with the shared secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a plain token (registration, login).
    pub fn create_token(
        &self,
        user_id: Uuid,
        user_type: i32,
        full_name: Option<String>,
    ) -> Result<String> {
        self.sign(user_id, user_type, full_name, None, DeviceMeta::default())
    }

    /// Issue a login-purpose token carrying the device fingerprint
    /// (OTP verification flow).
    pub fn create_login_token(
        &self,
        user_id: Uuid,
        user_type: i32,
        full_name: Option<String>,
        device: DeviceMeta,
    ) -> Result<String> {
        self.sign(user_id, user_type, full_name, Some(token_type::LOGIN), device)
    }

    fn sign(
        &self,
        user_id: Uuid,
        user_type: i32,
        full_name: Option<String>,
        token_type: Option<i32>,
        device: DeviceMeta,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            user_type,
            full_name,
            token_type,
            device,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key", Duration::hours(24))
    }

    #[test]
    fn test_create_and_verify_token() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service
            .create_token(user_id, 2, Some("Dr. Asha Rao".to_string()))
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.user_type, 2);
        assert_eq!(claims.full_name.as_deref(), Some("Dr. Asha Rao"));
        assert_eq!(claims.token_type, None);
    }

    #[test]
    fn test_login_token_carries_device_and_purpose() {
        let service = service();
        let user_id = Uuid::new_v4();
        let device = DeviceMeta {
            device_id: Some("dev-1".to_string()),
            device_type: Some("android".to_string()),
            ..Default::default()
        };

        let token = service
            .create_login_token(user_id, 3, None, device.clone())
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.token_type, Some(token_type::LOGIN));
        assert_eq!(claims.device, device);
    }

    #[test]
    fn test_invalid_token() {
        let service = service();
        assert!(service.verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", Duration::hours(1));
        let service2 = JwtService::new("secret2", Duration::hours(1));

        let token = service1.create_token(Uuid::new_v4(), 1, None).unwrap();
        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // Negative lifetime backdates the expiry past the default leeway.
        let service = JwtService::new("secret", Duration::seconds(-120));
        let token = service.create_token(Uuid::new_v4(), 1, None).unwrap();
        assert!(service.verify_token(&token).is_err());
    }
}
