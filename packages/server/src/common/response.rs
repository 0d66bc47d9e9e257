//! Response envelope shared by every endpoint.
//!
//! All responses, success and error alike, have the shape:
//! `{ success, status_code, message, result?, time }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Stable message codes exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgCode {
    SignupSuccess,
    LoginSuccess,
    LogoutSuccess,
    OtpVerified,
    PatientClinicalRecord,
    NoRecordFetched,
    HealthOk,
    AlreadyRegistered,
    AlreadyRegisteredEmail,
    OtpNotSent,
    UserNotFound,
    InvalidOtp,
    ExpiredOtp,
    InvalidCredentials,
    ValidationError,
    Unauthorized,
    NotFound,
    InternalServerError,
}

impl MsgCode {
    /// Wire code, matches what clients switch on.
    pub fn as_str(&self) -> &'static str {
        match self {
            MsgCode::SignupSuccess => "SIGNUP_SUCCESS",
            MsgCode::LoginSuccess => "LOGIN_SUCCESS",
            MsgCode::LogoutSuccess => "LOGOUT_SUCCESS",
            MsgCode::OtpVerified => "OTP_VERIFIED",
            MsgCode::PatientClinicalRecord => "PATIENT_CLINICAL_RECORD",
            MsgCode::NoRecordFetched => "NO_RECORD_FETCHED",
            MsgCode::HealthOk => "HEALTH_OK",
            MsgCode::AlreadyRegistered => "ALREADY_REGISTERED",
            MsgCode::AlreadyRegisteredEmail => "ALREADY_REGISTERED_EMAIL",
            MsgCode::OtpNotSent => "OTP_NOT_SENT",
            MsgCode::UserNotFound => "USER_NOT_FOUND",
            MsgCode::InvalidOtp => "INVALID_OTP",
            MsgCode::ExpiredOtp => "EXPIRED_OTP",
            MsgCode::InvalidCredentials => "INVALID_CREDENTIALS",
            MsgCode::ValidationError => "VALIDATION_ERROR",
            MsgCode::Unauthorized => "UNAUTHORIZED",
            MsgCode::NotFound => "NOT_FOUND",
            MsgCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Human-readable message for the envelope.
    pub fn message(&self) -> &'static str {
        match self {
            MsgCode::SignupSuccess => "You've successfully signed up.",
            MsgCode::LoginSuccess => "Login successful.",
            MsgCode::LogoutSuccess => "You've been logged out.",
            MsgCode::OtpVerified => "Phone number verified successfully.",
            MsgCode::PatientClinicalRecord => "Patient records fetched successfully.",
            MsgCode::NoRecordFetched => "No records found.",
            MsgCode::HealthOk => "Service is healthy.",
            MsgCode::AlreadyRegistered => "This phone number is already registered.",
            MsgCode::AlreadyRegisteredEmail => "This email address is already registered.",
            MsgCode::OtpNotSent => "We could not send the verification code. Please try again.",
            MsgCode::UserNotFound => "User not found.",
            MsgCode::InvalidOtp => "The verification code is invalid.",
            MsgCode::ExpiredOtp => "The verification code has expired.",
            MsgCode::InvalidCredentials => "Invalid credentials.",
            MsgCode::ValidationError => "Invalid request.",
            MsgCode::Unauthorized => "You are not authorized to perform this action.",
            MsgCode::NotFound => "Record not found.",
            MsgCode::InternalServerError => "Something went wrong. Please try again later.",
        }
    }
}

/// Build the envelope body. Pure so tests can inspect it.
pub fn envelope(success: bool, status: StatusCode, code: MsgCode, result: Option<Value>) -> Value {
    let mut body = json!({
        "success": success,
        "status_code": status.as_u16(),
        "message": code.message(),
        "msg_code": code.as_str(),
        "time": chrono::Utc::now().timestamp_millis(),
    });
    if let Some(result) = result {
        body["result"] = result;
    }
    body
}

/// Successful response with a payload.
pub fn success<T: Serialize>(code: MsgCode, status: StatusCode, result: T) -> Response {
    let result = serde_json::to_value(result).unwrap_or(Value::Null);
    (status, Json(envelope(true, status, code, Some(result)))).into_response()
}

/// Error response, optionally carrying detail data.
pub fn error(code: MsgCode, status: StatusCode, data: Option<Value>) -> Response {
    (status, Json(envelope(false, status, code, data))).into_response()
}
