use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Patient role profile. Registration creates it with schema defaults
/// (profile already completed and approved).
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub gender: Option<i32>,
    pub steps: i32,
    pub is_verified: i32,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub async fn find_by_user_id(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM patients WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(
        user_id: Uuid,
        email: Option<&str>,
        gender: Option<i32>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO patients (user_id, email, gender)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(email)
        .bind(gender)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
