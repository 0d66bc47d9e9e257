use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub app_env: String,
    pub jwt_secret: String,
    pub jwt_expires_in: String,
    pub default_otp: String,
    pub default_otp_length: usize,
    pub otp_expires_in_minutes: i64,
    pub authkey_api_key: Option<String>,
    pub authkey_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let config = Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expires_in: env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "7d".to_string()),
            default_otp: env::var("DEFAULT_OTP").unwrap_or_else(|_| "1234".to_string()),
            default_otp_length: env::var("DEFAULT_OTP_LENGTH")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("DEFAULT_OTP_LENGTH must be a valid number")?,
            otp_expires_in_minutes: env::var("OTP_EXPIRES_IN_MINUTES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("OTP_EXPIRES_IN_MINUTES must be a valid number")?,
            authkey_api_key: env::var("AUTHKEY_API_KEY").ok(),
            authkey_url: env::var("AUTHKEY_URL").ok(),
        };

        // SMS delivery only happens in production, so the gateway settings
        // are required there and optional everywhere else.
        if config.is_production() {
            if config.authkey_api_key.is_none() {
                bail!("AUTHKEY_API_KEY must be set when APP_ENV=production");
            }
            if config.authkey_url.is_none() {
                bail!("AUTHKEY_URL must be set when APP_ENV=production");
            }
        }

        Ok(config)
    }

    /// Production mode enables real SMS dispatch and random OTP generation.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Token lifetime parsed from the `JWT_EXPIRES_IN` string (e.g. "7d").
    pub fn jwt_ttl(&self) -> Result<chrono::Duration> {
        parse_expires_in(&self.jwt_expires_in)
    }
}

/// Parse a lifetime string of the form `<n>[s|m|h|d]`.
///
/// A bare number is taken as seconds, matching the common JWT convention.
pub fn parse_expires_in(raw: &str) -> Result<chrono::Duration> {
    let s = raw.trim();
    if s.is_empty() {
        bail!("empty expiry string");
    }

    let (digits, unit) = match s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, "s"),
    };

    let value: i64 = digits
        .parse()
        .with_context(|| format!("invalid expiry string: {raw}"))?;

    match unit {
        "s" => Ok(chrono::Duration::seconds(value)),
        "m" => Ok(chrono::Duration::minutes(value)),
        "h" => Ok(chrono::Duration::hours(value)),
        "d" => Ok(chrono::Duration::days(value)),
        _ => bail!("invalid expiry unit in: {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_expires_in("7d").unwrap(), chrono::Duration::days(7));
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(parse_expires_in("24h").unwrap(), chrono::Duration::hours(24));
        assert_eq!(parse_expires_in("30m").unwrap(), chrono::Duration::minutes(30));
        assert_eq!(parse_expires_in("45s").unwrap(), chrono::Duration::seconds(45));
    }

    #[test]
    fn test_bare_number_is_seconds() {
        assert_eq!(parse_expires_in("3600").unwrap(), chrono::Duration::seconds(3600));
    }

    #[test]
    fn test_invalid_strings() {
        assert!(parse_expires_in("").is_err());
        assert!(parse_expires_in("7w").is_err());
        assert!(parse_expires_in("d7").is_err());
        assert!(parse_expires_in("abc").is_err());
    }
}
