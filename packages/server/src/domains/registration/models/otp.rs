use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Pending OTP challenge. The code itself is stored as a bcrypt hash;
/// multiple records per user may exist, reads always take the newest.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Most recent OTP issued to a user, if any
    pub async fn find_latest(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM otps WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist a new OTP challenge
    pub async fn create(
        user_id: Uuid,
        otp_hash: &str,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO otps (user_id, otp_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(otp_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete one challenge by id. Returns rows removed; deleting an already
    /// consumed record is not an error.
    pub async fn delete_by_id(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM otps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            otp_hash: "$2b$04$hash".to_string(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let now = Utc::now();
        assert!(!record(now + Duration::minutes(10)).is_expired(now));
    }

    #[test]
    fn test_expired_after_deadline() {
        let now = Utc::now();
        assert!(record(now - Duration::seconds(1)).is_expired(now));
    }

    #[test]
    fn test_exact_deadline_is_still_valid() {
        let now = Utc::now();
        assert!(!record(now).is_expired(now));
    }
}
