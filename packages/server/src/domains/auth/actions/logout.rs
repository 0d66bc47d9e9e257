//! Logout action

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::common::ApiError;
use crate::domains::auth::Session;

/// Logout identifiers resolved from the request (header, body, query or
/// cookie). At least one of the two must be present.
#[derive(Debug, Clone, Default)]
pub struct LogoutInput {
    pub token: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutSummary {
    pub deleted_count: u64,
    pub sessions: bool,
}

pub fn validate_logout_inputs(input: &LogoutInput) -> Result<(), ApiError> {
    let has_token = input.token.as_deref().is_some_and(|t| !t.trim().is_empty());
    let has_device = input
        .device_id
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    if has_token || has_device {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "token or deviceId is required".to_string(),
        ))
    }
}

/// Delete the sessions named by the token and/or device id.
///
/// Both deletions are best-effort: a failed delete is logged and counted as
/// zero rather than failing the whole logout.
pub async fn logout(input: &LogoutInput, pool: &PgPool) -> Result<LogoutSummary, ApiError> {
    validate_logout_inputs(input)?;

    let mut deleted_count = 0u64;

    if let Some(token) = input.token.as_deref().filter(|t| !t.trim().is_empty()) {
        match Session::delete_by_jwt(token, pool).await {
            Ok(n) => deleted_count += n,
            Err(err) => warn!(error = %err, "session delete by token failed"),
        }
    }

    if let Some(device_id) = input.device_id.as_deref().filter(|d| !d.trim().is_empty()) {
        match Session::delete_by_device_id(device_id, pool).await {
            Ok(n) => deleted_count += n,
            Err(err) => warn!(error = %err, "session delete by device failed"),
        }
    }

    info!(deleted_count, "logout completed");

    Ok(LogoutSummary {
        deleted_count,
        sessions: deleted_count > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_token_or_device() {
        assert!(validate_logout_inputs(&LogoutInput::default()).is_err());
        assert!(validate_logout_inputs(&LogoutInput {
            token: Some("   ".to_string()),
            device_id: None,
        })
        .is_err());
    }

    #[test]
    fn test_token_alone_is_enough() {
        assert!(validate_logout_inputs(&LogoutInput {
            token: Some("ey.abc.def".to_string()),
            device_id: None,
        })
        .is_ok());
    }

    #[test]
    fn test_device_alone_is_enough() {
        assert!(validate_logout_inputs(&LogoutInput {
            token: None,
            device_id: Some("device-42".to_string()),
        })
        .is_ok());
    }
}
