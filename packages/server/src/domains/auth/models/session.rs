use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::auth::DeviceMeta;

/// One authenticated device binding: the issued token plus the device
/// identifiers it was issued to. Deleted on logout; no TTL.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub jwt: String,
    pub device_id: Option<String>,
    pub device_type: Option<String>,
    pub device_token: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub token_type: i32,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Persist a new session for an issued token
    pub async fn create(
        user_id: Uuid,
        jwt: &str,
        device: &DeviceMeta,
        token_type: i32,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO sessions
                (user_id, jwt, device_id, device_type, device_token, browser, os, os_version, token_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(user_id)
        .bind(jwt)
        .bind(&device.device_id)
        .bind(&device.device_type)
        .bind(&device.device_token)
        .bind(&device.browser)
        .bind(&device.os)
        .bind(&device.os_version)
        .bind(token_type)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete at most one session matching the token exactly.
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_jwt(jwt: &str, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM sessions
             WHERE id = (SELECT id FROM sessions WHERE jwt = $1 ORDER BY created_at DESC LIMIT 1)",
        )
        .bind(jwt)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every session bound to a device id.
    /// Returns the number of rows removed.
    pub async fn delete_by_device_id(device_id: &str, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE device_id = $1")
            .bind(device_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
