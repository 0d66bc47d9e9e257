//! Doctor endpoints.

use std::collections::HashMap;

use axum::extract::{Extension, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::common::response::{self, MsgCode};
use crate::common::{get_pagination, ApiError, SortOrder};
use crate::domains::doctor::actions::patient_list;
use crate::domains::user::models::Doctor;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// Query params, named as the mobile clients send them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientListQuery {
    /// List filter; only TODAY is recognized.
    #[serde(rename = "type")]
    pub filter: Option<String>,
    pub search: Option<String>,
    /// Sort field; only patientName is supported, anything else sorts by it
    /// anyway.
    pub sort: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// GET /doctor/list
///
/// Distinct patients of the calling doctor, grouped by first letter.
/// Identity comes from the JWT when present, with header/query fallbacks
/// for clients that have not migrated to bearer auth.
pub async fn patient_list_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Query(query): Query<PatientListQuery>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let user_id = resolve_doctor_identity(auth.as_deref(), &headers, &raw)
        .ok_or(ApiError::Unauthorized)?;

    let doctor = Doctor::find_by_user_id(user_id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    let pagination = get_pagination(query.page, query.size);
    let order = SortOrder::from_param(query.sort_order.as_deref());

    let outcome = patient_list(
        doctor.id,
        query.filter.as_deref(),
        query.search.as_deref(),
        order,
        &pagination,
        &state.db_pool,
    )
    .await?;

    let code = if outcome.data.is_empty() {
        MsgCode::NoRecordFetched
    } else {
        MsgCode::PatientClinicalRecord
    };

    Ok(response::success(code, StatusCode::OK, outcome))
}

/// JWT extension first, then the `x-user-id` header, then a `userId` query
/// parameter.
fn resolve_doctor_identity(
    auth: Option<&AuthUser>,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Option<Uuid> {
    if let Some(user) = auth {
        return Some(user.user_id);
    }
    if let Some(raw) = headers.get("x-user-id").and_then(|v| v.to_str().ok()) {
        if let Ok(id) = raw.parse() {
            return Some(id);
        }
    }
    params.get("userId").and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_wins() {
        let user_id = Uuid::new_v4();
        let auth = AuthUser {
            user_id,
            user_type: 2,
            full_name: None,
        };
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", Uuid::new_v4().to_string().parse().unwrap());

        let resolved = resolve_doctor_identity(Some(&auth), &headers, &HashMap::new());
        assert_eq!(resolved, Some(user_id));
    }

    #[test]
    fn test_header_fallback() {
        let user_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", user_id.to_string().parse().unwrap());

        let resolved = resolve_doctor_identity(None, &headers, &HashMap::new());
        assert_eq!(resolved, Some(user_id));
    }

    #[test]
    fn test_query_params_use_client_names() {
        let uri: axum::http::Uri =
            "/doctor/list?type=TODAY&sortOrder=DESC&sort=patientName&page=2&size=5"
                .parse()
                .unwrap();
        let Query(q) = Query::<PatientListQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(q.filter.as_deref(), Some("TODAY"));
        assert_eq!(q.sort.as_deref(), Some("patientName"));
        assert_eq!(SortOrder::from_param(q.sort_order.as_deref()), SortOrder::Desc);
        assert_eq!(q.page, Some(2));
        assert_eq!(q.size, Some(5));
    }

    #[test]
    fn test_query_fallback_and_bad_values() {
        let user_id = Uuid::new_v4();
        let mut params = HashMap::new();
        params.insert("userId".to_string(), user_id.to_string());
        assert_eq!(
            resolve_doctor_identity(None, &HeaderMap::new(), &params),
            Some(user_id)
        );

        params.insert("userId".to_string(), "not-a-uuid".to_string());
        assert_eq!(resolve_doctor_identity(None, &HeaderMap::new(), &params), None);
    }
}
