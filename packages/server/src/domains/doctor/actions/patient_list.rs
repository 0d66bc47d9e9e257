//! Doctor patient list: distinct patients grouped alphabetically.
//!
//! Pagination applies to the letter groups, not the patients inside them,
//! and the reported count is the total number of groups.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::constants::{NA, PATIENT_LIST_TODAY};
use crate::common::{ApiError, Pagination, SortOrder};
use crate::domains::doctor::models::PatientListRow;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientGroup {
    pub letter: String,
    pub patients: Vec<PatientListRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientListOutcome {
    pub count: usize,
    pub data: Vec<PatientGroup>,
}

/// The "TODAY" appointment-date window: from the start of yesterday through
/// the last millisecond of today. The two-day span is intentional and kept
/// for client compatibility.
pub fn today_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day_start = now.date_naive().and_time(NaiveTime::MIN);
    let start = (day_start - Duration::days(1)).and_utc();
    let end = (day_start + Duration::days(1) - Duration::milliseconds(1)).and_utc();
    (start, end)
}

fn first_letter(name: &str) -> String {
    match name.trim().chars().next() {
        Some(c) => c.to_uppercase().to_string(),
        None => NA.to_string(),
    }
}

/// Group patients by uppercase first letter. Groups come back in ascending
/// letter order; `order` controls the name sort inside each group.
pub fn group_patients(mut rows: Vec<PatientListRow>, order: SortOrder) -> Vec<PatientGroup> {
    rows.sort_by(|a, b| {
        let cmp = a
            .patient_name
            .to_lowercase()
            .cmp(&b.patient_name.to_lowercase());
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });

    let mut groups: std::collections::BTreeMap<String, Vec<PatientListRow>> = Default::default();
    for row in rows {
        groups
            .entry(first_letter(&row.patient_name))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|(letter, patients)| PatientGroup { letter, patients })
        .collect()
}

/// Page over groups. Returns the total group count and the page slice.
pub fn paginate_groups(
    groups: Vec<PatientGroup>,
    pagination: &Pagination,
) -> (usize, Vec<PatientGroup>) {
    let count = groups.len();
    let page = groups
        .into_iter()
        .skip(pagination.offset as usize)
        .take(pagination.limit as usize)
        .collect();
    (count, page)
}

/// Fetch, group and paginate the doctor's patients.
pub async fn patient_list(
    doctor_id: Uuid,
    filter: Option<&str>,
    search: Option<&str>,
    order: SortOrder,
    pagination: &Pagination,
    pool: &PgPool,
) -> Result<PatientListOutcome, ApiError> {
    let window = filter
        .filter(|f| f.eq_ignore_ascii_case(PATIENT_LIST_TODAY))
        .map(|_| today_window(Utc::now()));

    let rows = PatientListRow::distinct_patients(doctor_id, window, search, pool).await?;
    let groups = group_patients(rows, order);
    let (count, data) = paginate_groups(groups, pagination);

    Ok(PatientListOutcome { count, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(name: &str) -> PatientListRow {
        PatientListRow {
            patient_id: Uuid::new_v4(),
            patient_name: name.to_string(),
            profile_pic: None,
        }
    }

    #[test]
    fn test_today_window_spans_two_days() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 14, 30, 0).unwrap();
        let (start, end) = today_window(now);
        assert_eq!(start.to_rfc3339(), "2026-08-23T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-08-24T23:59:59.999+00:00");
    }

    #[test]
    fn test_first_letter_uppercases_and_defaults() {
        assert_eq!(first_letter("asha"), "A");
        assert_eq!(first_letter("  Zoya"), "Z");
        assert_eq!(first_letter(""), "N/A");
        assert_eq!(first_letter("   "), "N/A");
    }

    #[test]
    fn test_groups_sorted_by_letter_ascending() {
        let groups = group_patients(
            vec![row("meera"), row("Asha"), row("arun"), row("Zoya")],
            SortOrder::Asc,
        );
        let letters: Vec<&str> = groups.iter().map(|g| g.letter.as_str()).collect();
        assert_eq!(letters, vec!["A", "M", "Z"]);
        assert_eq!(groups[0].patients.len(), 2);
    }

    #[test]
    fn test_desc_order_reverses_names_within_group() {
        let groups = group_patients(vec![row("Arun"), row("Asha")], SortOrder::Desc);
        let names: Vec<&str> = groups[0]
            .patients
            .iter()
            .map(|p| p.patient_name.as_str())
            .collect();
        assert_eq!(names, vec!["Asha", "Arun"]);
    }

    #[test]
    fn test_count_is_group_count_not_patient_count() {
        let groups = group_patients(
            vec![row("Asha"), row("Arun"), row("Meera")],
            SortOrder::Asc,
        );
        let (count, _) = paginate_groups(groups, &Pagination { limit: 10, offset: 0 });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_pagination_walks_groups() {
        let names = ["Asha", "Bela", "Chitra", "Dev", "Esha"];
        let groups = group_patients(names.iter().map(|n| row(n)).collect(), SortOrder::Asc);

        let (count, page) = paginate_groups(groups.clone(), &Pagination { limit: 2, offset: 2 });
        assert_eq!(count, 5);
        let letters: Vec<&str> = page.iter().map(|g| g.letter.as_str()).collect();
        assert_eq!(letters, vec!["C", "D"]);

        let (_, tail) = paginate_groups(groups, &Pagination { limit: 10, offset: 4 });
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].letter, "E");
    }
}
