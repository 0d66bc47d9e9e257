//! Login action

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::constants::{profile_status, profile_step};
use crate::common::ApiError;
use crate::domains::auth::types::LoginRequest;
use crate::domains::auth::JwtService;
use crate::domains::user::models::{normalize_phone, Doctor, User, UserProjection};

/// Successful login response payload.
///
/// `steps`/`profile_screen`/`approval_status` are fixed defaults here; the
/// authoritative values come from OTP verification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProjection,
    pub steps: i32,
    pub profile_screen: i32,
    pub profile_pic: Option<String>,
    pub approval_status: i32,
    pub doctor_id: Option<Uuid>,
    pub establishment_name: Option<String>,
    pub hospital_timing: Option<serde_json::Value>,
    pub user_type: i32,
}

/// Authenticate by phone, or by email via the doctor profile indirection.
///
/// Every failure mode (unknown user, missing stored hash, wrong password)
/// returns the same `InvalidCredentials` so callers cannot enumerate
/// accounts; the distinguishing detail goes to the log only.
pub async fn login(
    req: &LoginRequest,
    jwt: &JwtService,
    pool: &PgPool,
) -> Result<LoginOutcome, ApiError> {
    let phone = req.phone.as_deref().map(normalize_phone);
    let email = req.email.as_deref().map(|e| e.trim().to_lowercase());

    // 1. Lookup by phone first (most common)
    let mut user: Option<User> = None;
    if let Some(phone) = &phone {
        user = User::find_by_phone(phone, &req.country_code, req.user_type, pool).await?;
    }

    // 2. Fall back to email -> doctor profile -> user
    if user.is_none() {
        if let Some(email) = &email {
            if let Some(doctor) = Doctor::find_by_email(email, pool).await? {
                user = User::find_by_id(doctor.user_id, pool).await?;
            }
        }
    }

    let Some(user) = user else {
        warn!(phone = ?phone, email = ?email, "login failed: user not found");
        return Err(ApiError::InvalidCredentials);
    };

    if user.password.is_empty() {
        warn!(user_id = %user.id, "login failed: no stored password hash");
        return Err(ApiError::InvalidCredentials);
    }

    if !crate::domains::auth::password::compare_hash(&req.password, &user.password) {
        warn!(user_id = %user.id, "login failed: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let token = jwt.create_token(user.id, user.user_type, Some(user.full_name.clone()))?;

    // Response enrichment only; login works for profiles that don't exist yet.
    let doctor_id = Doctor::find_by_user_id(user.id, pool)
        .await?
        .map(|doctor| doctor.id);

    info!(user_id = %user.id, "login successful");

    Ok(LoginOutcome {
        token,
        user: user.projection(),
        steps: profile_step::SECTION_B,
        profile_screen: 1,
        profile_pic: None,
        approval_status: profile_status::PENDING,
        doctor_id,
        establishment_name: None,
        hospital_timing: None,
        user_type: user.user_type,
    })
}
