use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// One distinct patient a doctor has seen, as shown in the patient list.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientListRow {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub profile_pic: Option<String>,
}

impl PatientListRow {
    /// Distinct patients with at least one self-booked appointment with the
    /// doctor, optionally restricted to an appointment-date window and a
    /// case-insensitive search on patient name or phone.
    pub async fn distinct_patients(
        doctor_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        search: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        patient_query(doctor_id, window, search)
            .build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

fn patient_query(
    doctor_id: Uuid,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    search: Option<&str>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT DISTINCT p.id AS patient_id, u.full_name AS patient_name, p.profile_pic
         FROM appointments a
         JOIN patients p ON p.id = a.patient_id
         JOIN users u ON u.id = p.user_id
         WHERE a.self_booked = true AND u.is_deleted = false AND a.doctor_id = ",
    );
    query.push_bind(doctor_id);

    if let Some((from, to)) = window {
        query.push(" AND a.appointment_date >= ");
        query.push_bind(from);
        query.push(" AND a.appointment_date <= ");
        query.push_bind(to);
    }

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like(term));
        query.push(" AND (u.full_name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR u.phone ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    query
}

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
