//! Registration action: create the identity, role profile and OTP challenge.

use std::collections::HashMap;

use authkey::AuthkeyService;
use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::common::constants::{gender_code, user_type, OTP_TEMPLATE_SID};
use crate::common::ApiError;
use crate::config::Config;
use crate::domains::auth::{password, JwtService};
use crate::domains::registration::models::OtpRecord;
use crate::domains::registration::otp::generate_otp;
use crate::domains::registration::types::RegisterRequest;
use crate::domains::user::models::{
    normalize_phone, Doctor, Hospital, Patient, User, UserProjection,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutcome {
    pub token: String,
    pub data: UserProjection,
}

/// Which duplicate (if any) blocks this registration.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistrationCheck {
    Ok,
    DuplicatePhone,
    DuplicateEmail,
}

pub async fn check_existing(
    phone: &str,
    country_code: &str,
    role: i32,
    email: Option<&str>,
    pool: &PgPool,
) -> Result<RegistrationCheck, ApiError> {
    if User::find_by_phone(phone, country_code, role, pool)
        .await?
        .is_some()
    {
        return Ok(RegistrationCheck::DuplicatePhone);
    }
    if role == user_type::DOCTOR {
        if let Some(email) = email {
            if Doctor::find_by_email(email, pool).await?.is_some() {
                return Ok(RegistrationCheck::DuplicateEmail);
            }
        }
    }
    Ok(RegistrationCheck::Ok)
}

/// Register a user, create their role profile, issue a token and send an
/// OTP challenge to the phone.
///
/// Outside production the OTP is the configured default and nothing is sent
/// over SMS. A failed SMS dispatch in production fails the call with
/// `OtpNotSent` after the records are already written; verification can be
/// retried once the client obtains a code.
pub async fn register(
    req: &RegisterRequest,
    config: &Config,
    jwt: &JwtService,
    sms: Option<&AuthkeyService>,
    pool: &PgPool,
) -> Result<RegisterOutcome, ApiError> {
    req.validate()?;

    let phone = normalize_phone(&req.phone);
    let email = req.email.as_deref().map(|e| e.trim().to_lowercase());

    match check_existing(
        &phone,
        &req.country_code,
        req.user_type,
        email.as_deref(),
        pool,
    )
    .await?
    {
        RegistrationCheck::DuplicatePhone => return Err(ApiError::AlreadyRegistered),
        RegistrationCheck::DuplicateEmail => return Err(ApiError::AlreadyRegisteredEmail),
        RegistrationCheck::Ok => {}
    }

    let password_hash = password::generate_hash(&req.password)?;
    let user = User::create(
        req.full_name.trim(),
        &phone,
        &req.country_code,
        req.user_type,
        &password_hash,
        pool,
    )
    .await?;

    match req.user_type {
        user_type::DOCTOR => {
            let gender = req.gender.as_deref().map(gender_code).unwrap_or_default();
            Doctor::create(
                user.id,
                gender,
                req.city.as_deref().unwrap_or_default(),
                req.state.as_deref().unwrap_or_default(),
                email.as_deref().unwrap_or_default(),
                req.experience.as_deref().unwrap_or_default(),
                req.specialization.as_deref().unwrap_or_default(),
                req.education.clone(),
                pool,
            )
            .await?;
        }
        user_type::HOSPITAL => {
            Hospital::create(user.id, pool).await?;
        }
        _ => {
            let gender = req.gender.as_deref().map(gender_code);
            Patient::create(user.id, email.as_deref(), gender, pool).await?;
        }
    }

    let token = jwt.create_token(user.id, user.user_type, Some(user.full_name.clone()))?;

    let otp = if config.is_production() {
        generate_otp(config.default_otp_length)
    } else {
        config.default_otp.clone()
    };
    if !config.is_production() {
        debug!(user_id = %user.id, otp, "issued development otp");
    }

    let otp_hash = password::generate_hash(&otp)?;
    let expires_at = Utc::now() + Duration::minutes(config.otp_expires_in_minutes);
    OtpRecord::create(user.id, &otp_hash, expires_at, pool).await?;

    if config.is_production() {
        let mut params = HashMap::new();
        params.insert("otp".to_string(), otp);
        let sent = match sms {
            Some(sms) => {
                sms.send_otp(&user.phone, &user.country_code, &params, Some(OTP_TEMPLATE_SID))
                    .await
            }
            None => false,
        };
        if !sent {
            warn!(user_id = %user.id, "otp sms dispatch failed");
            return Err(ApiError::OtpNotSent);
        }
    }

    info!(user_id = %user.id, role = user.user_type, "user registered");

    Ok(RegisterOutcome {
        token,
        data: user.projection(),
    })
}
