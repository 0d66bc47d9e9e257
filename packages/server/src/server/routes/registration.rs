//! Registration endpoints: signup and OTP verification.

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::common::response::{self, MsgCode};
use crate::common::ApiError;
use crate::domains::registration::actions::{register, verify_otp};
use crate::domains::registration::{RegisterRequest, VerifyOtpRequest};
use crate::server::app::AppState;

/// POST /registration/register
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let outcome = register(
        &req,
        &state.config,
        &state.jwt_service,
        state.sms.as_deref(),
        &state.db_pool,
    )
    .await?;

    Ok(response::success(
        MsgCode::SignupSuccess,
        StatusCode::CREATED,
        outcome,
    ))
}

/// POST /registration/verify-otp
pub async fn verify_otp_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Response, ApiError> {
    let outcome = verify_otp(&req, &state.jwt_service, &state.db_pool).await?;

    Ok(response::success(
        MsgCode::OtpVerified,
        StatusCode::ACCEPTED,
        outcome,
    ))
}
