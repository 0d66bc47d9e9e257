use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::constants::user_type;
use crate::domains::user::models::{Doctor, Hospital, Patient};

/// Role-agnostic view of a profile, used by verification and login
/// responses. `profile_screen` is absent for patients.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub steps: i32,
    pub profile_screen: Option<i32>,
    pub is_verified: i32,
    pub profile_pic: Option<String>,
}

impl From<&Doctor> for ProfileSummary {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            steps: doctor.steps,
            profile_screen: Some(doctor.profile_screen),
            is_verified: doctor.is_verified,
            profile_pic: doctor.profile_pic.clone(),
        }
    }
}

impl From<&Patient> for ProfileSummary {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            steps: patient.steps,
            profile_screen: None,
            is_verified: patient.is_verified,
            profile_pic: patient.profile_pic.clone(),
        }
    }
}

impl From<&Hospital> for ProfileSummary {
    fn from(hospital: &Hospital) -> Self {
        Self {
            id: hospital.id,
            steps: hospital.steps,
            profile_screen: Some(hospital.profile_screen),
            is_verified: hospital.is_verified,
            profile_pic: hospital.profile_pic.clone(),
        }
    }
}

impl ProfileSummary {
    /// Resolve the role profile for a user, dispatching on the role tag.
    pub async fn find(role: i32, user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let summary = match role {
            user_type::DOCTOR => Doctor::find_by_user_id(user_id, pool)
                .await?
                .as_ref()
                .map(Into::into),
            user_type::PATIENT => Patient::find_by_user_id(user_id, pool)
                .await?
                .as_ref()
                .map(Into::into),
            user_type::HOSPITAL => Hospital::find_by_user_id(user_id, pool)
                .await?
                .as_ref()
                .map(Into::into),
            _ => None,
        };
        Ok(summary)
    }
}
