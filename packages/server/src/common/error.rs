//! API error taxonomy.
//!
//! Every flow returns `Result<_, ApiError>`; axum renders the envelope via
//! `IntoResponse`, so no error crosses the HTTP boundary unhandled.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::response::{self, MsgCode};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unauthorized")]
    Unauthorized,

    /// Uniform credential failure; never reveals which factor was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("resource not found")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("phone number already registered")]
    AlreadyRegistered,

    #[error("email already registered")]
    AlreadyRegisteredEmail,

    /// SMS gateway reported failure.
    #[error("otp could not be delivered")]
    OtpNotSent,

    /// No OTP record exists for the phone+role pair.
    #[error("no otp on record")]
    OtpRecordNotFound,

    /// An OTP record exists but the submitted code does not match.
    #[error("otp mismatch")]
    OtpMismatch,

    #[error("otp expired")]
    ExpiredOtp,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, MsgCode) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, MsgCode::ValidationError),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, MsgCode::Unauthorized),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, MsgCode::InvalidCredentials)
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, MsgCode::NotFound),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, MsgCode::UserNotFound),
            ApiError::AlreadyRegistered => (StatusCode::FORBIDDEN, MsgCode::AlreadyRegistered),
            ApiError::AlreadyRegisteredEmail => {
                (StatusCode::FORBIDDEN, MsgCode::AlreadyRegisteredEmail)
            }
            ApiError::OtpNotSent => (StatusCode::FORBIDDEN, MsgCode::OtpNotSent),
            ApiError::OtpRecordNotFound => (StatusCode::FORBIDDEN, MsgCode::InvalidOtp),
            ApiError::OtpMismatch => (StatusCode::NOT_ACCEPTABLE, MsgCode::InvalidOtp),
            ApiError::ExpiredOtp => (StatusCode::NOT_ACCEPTABLE, MsgCode::ExpiredOtp),
            ApiError::Database(_) | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MsgCode::InternalServerError,
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Unexpected failures are logged with full context; the caller only
        // ever sees the generic message.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
        }

        let data = match &self {
            ApiError::Validation(message) => Some(json!({ "message": message })),
            _ => None,
        };

        response::error(code, status, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_errors_map_to_distinct_statuses() {
        let (status, code) = ApiError::OtpRecordNotFound.status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, MsgCode::InvalidOtp);

        let (status, code) = ApiError::OtpMismatch.status_and_code();
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(code, MsgCode::InvalidOtp);

        let (status, _) = ApiError::ExpiredOtp.status_and_code();
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_credential_failures_are_uniform() {
        let (status, code) = ApiError::InvalidCredentials.status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, MsgCode::InvalidCredentials);
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("connection pool exhausted"));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, MsgCode::InternalServerError);
    }
}
