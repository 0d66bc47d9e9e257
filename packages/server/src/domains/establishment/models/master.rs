use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Establishment master record for a facility account.
///
/// `hospital_id` references the hospital role profile, not the user.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentMaster {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub name: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EstablishmentMaster {
    pub async fn find_by_hospital_id(hospital_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM establishment_masters WHERE hospital_id = $1")
            .bind(hospital_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
