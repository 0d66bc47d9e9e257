use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Weekly timing sheet for an establishment.
///
/// Rows with a `doctor_id` are per-doctor schedules; the hospital-level
/// sheet is the row where `doctor_id` is null.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentTiming {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub doctor_id: Option<Uuid>,
    pub slot_time: i32,
    /// Per-day slot lists keyed by weekday (mon..sun).
    pub hours: Json<serde_json::Value>,
    pub is_verified: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EstablishmentTiming {
    /// Hospital-level timing for an establishment (no doctor attached).
    pub async fn find_hospital_timing(
        establishment_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM establishment_timings
             WHERE establishment_id = $1 AND doctor_id IS NULL",
        )
        .bind(establishment_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
