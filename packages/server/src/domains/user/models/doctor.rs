use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// One education entry on a doctor profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Education {
    pub degree: String,
    pub college: String,
    pub year: String,
}

/// Doctor role profile, one-to-one with a user via `user_id`.
///
/// `email` doubles as the login lookup key for doctors signing in by email.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Doctor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gender: i32,
    pub city: Option<String>,
    pub state: Option<String>,
    pub email: Option<String>,
    pub experience: Option<String>,
    pub specialization: Option<String>,
    pub education: Json<Vec<Education>>,
    pub steps: i32,
    pub profile_screen: i32,
    pub is_verified: i32,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    /// Find doctor profile by email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM doctors WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find doctor profile by owning user id
    pub async fn find_by_user_id(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM doctors WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new doctor profile
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        user_id: Uuid,
        gender: i32,
        city: &str,
        state: &str,
        email: &str,
        experience: &str,
        specialization: &str,
        education: Vec<Education>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO doctors
                (user_id, gender, city, state, email, experience, specialization, education)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(user_id)
        .bind(gender)
        .bind(city)
        .bind(state)
        .bind(email)
        .bind(experience)
        .bind(specialization)
        .bind(Json(education))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
