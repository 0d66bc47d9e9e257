//! OTP verification action: confirm the challenge and open a session.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::constants::{profile_status, profile_step, token_type, user_type};
use crate::common::ApiError;
use crate::domains::auth::{password, JwtService, Session};
use crate::domains::establishment::models::{EstablishmentMaster, EstablishmentTiming};
use crate::domains::registration::models::OtpRecord;
use crate::domains::registration::types::VerifyOtpRequest;
use crate::domains::user::models::{normalize_phone, ProfileSummary, User, UserProjection};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpOutcome {
    pub token: String,
    pub user: UserProjection,
    pub steps: i32,
    pub profile_screen: Option<i32>,
    pub profile_pic: Option<String>,
    pub approval_status: i32,
    pub profile_id: Option<Uuid>,
    pub establishment_name: Option<String>,
    pub hospital_timing: Option<serde_json::Value>,
    pub user_type: i32,
}

/// Verify the most recent OTP for the phone + role and issue a login token
/// bound to the caller's device. Checks run in a fixed order: user exists,
/// a challenge exists, the code matches, the challenge has not expired.
pub async fn verify_otp(
    req: &VerifyOtpRequest,
    jwt: &JwtService,
    pool: &PgPool,
) -> Result<VerifyOtpOutcome, ApiError> {
    req.validate()?;

    let phone = normalize_phone(&req.phone);
    let user = User::find_by_phone(&phone, &req.country_code, req.user_type, pool)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let record = OtpRecord::find_latest(user.id, pool)
        .await?
        .ok_or(ApiError::OtpRecordNotFound)?;

    if !password::compare_hash(req.otp.trim(), &record.otp_hash) {
        warn!(user_id = %user.id, "otp mismatch");
        return Err(ApiError::OtpMismatch);
    }
    if record.is_expired(Utc::now()) {
        return Err(ApiError::ExpiredOtp);
    }

    let profile = ProfileSummary::find(user.user_type, user.id, pool).await?;

    let mut establishment_name = None;
    let mut hospital_timing = None;
    let mut full_name = user.full_name.clone();
    if user.user_type == user_type::HOSPITAL {
        if let Some(profile) = &profile {
            if let Some(master) = EstablishmentMaster::find_by_hospital_id(profile.id, pool).await?
            {
                if let Some(name) = &master.name {
                    full_name = name.clone();
                    establishment_name = Some(name.clone());
                }
                hospital_timing = EstablishmentTiming::find_hospital_timing(master.id, pool)
                    .await?
                    .map(|timing| timing.hours.0);
            }
        }
    }

    let token = jwt.create_login_token(
        user.id,
        user.user_type,
        Some(full_name),
        req.device.clone(),
    )?;
    Session::create(user.id, &token, &req.device, token_type::LOGIN, pool).await?;

    // Consume the challenge; a concurrent verify already removing it is fine.
    if let Err(err) = OtpRecord::delete_by_id(record.id, pool).await {
        warn!(user_id = %user.id, error = %err, "otp cleanup failed");
    }

    info!(user_id = %user.id, "otp verified, session opened");

    Ok(VerifyOtpOutcome {
        token,
        user: user.projection(),
        steps: profile
            .as_ref()
            .map(|p| p.steps)
            .unwrap_or(profile_step::SECTION_A),
        profile_screen: profile.as_ref().and_then(|p| p.profile_screen),
        profile_pic: profile.as_ref().and_then(|p| p.profile_pic.clone()),
        approval_status: profile
            .as_ref()
            .map(|p| p.is_verified)
            .unwrap_or(profile_status::PENDING),
        profile_id: profile.as_ref().map(|p| p.id),
        establishment_name,
        hospital_timing,
        user_type: user.user_type,
    })
}
