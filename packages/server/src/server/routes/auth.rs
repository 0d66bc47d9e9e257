//! Session endpoints: login and logout.

use std::collections::HashMap;

use axum::extract::{Extension, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;

use crate::common::response::{self, MsgCode};
use crate::common::ApiError;
use crate::domains::auth::actions::{login, logout, LogoutInput};
use crate::domains::auth::types::{LoginRequest, LogoutBody};
use crate::server::app::AppState;

/// POST /registration/login
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    req.validate()?;
    let outcome = login(&req, &state.jwt_service, &state.db_pool).await?;

    Ok(response::success(MsgCode::LoginSuccess, StatusCode::OK, outcome))
}

/// POST /registration/logout
///
/// The token and device id can arrive through several channels; resolution
/// order is fixed: token from Authorization header, then body, then query,
/// then cookie; device id from body, then query, then cookie.
pub async fn logout_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: Option<Json<LogoutBody>>,
) -> Result<Response, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let input = resolve_logout_input(&headers, &params, &body);

    let summary = logout(&input, &state.db_pool).await?;

    Ok(response::success(MsgCode::LogoutSuccess, StatusCode::OK, summary))
}

fn resolve_logout_input(
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    body: &LogoutBody,
) -> LogoutInput {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let token = bearer_token(headers)
        .or_else(|| body.token.clone())
        .or_else(|| params.get("token").cloned())
        .or_else(|| cookie_value(cookies, "token"));

    let device_id = body
        .device_id
        .clone()
        .or_else(|| params.get("deviceId").cloned())
        .or_else(|| cookie_value(cookies, "deviceId"));

    LogoutInput { token, device_id }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}
