use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Hospital role profile. Facility details live on the establishment
/// master; this row tracks onboarding progress.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Hospital {
    pub id: Uuid,
    pub user_id: Uuid,
    pub steps: i32,
    pub profile_screen: i32,
    pub is_verified: i32,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    pub async fn find_by_user_id(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM hospitals WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(user_id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO hospitals (user_id)
             VALUES ($1)
             RETURNING *",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
