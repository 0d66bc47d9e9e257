use std::sync::Arc;

use axum::{middleware::Next, response::Response};
use tracing::debug;
use uuid::Uuid;

use crate::domains::auth::JwtService;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub user_type: i32,
    pub full_name: Option<String>,
}

/// JWT authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. With no token or an invalid token the
/// request continues without AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(user_id = %user.user_id, role = user.user_type, "authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("no valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: claims.user_id,
        user_type: claims.user_type,
        full_name: claims.full_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> JwtService {
        JwtService::new("test_secret", Duration::hours(1))
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(user_id, 2, Some("Dr. Rao".to_string()))
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().user_id, user_id);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let user_id = Uuid::new_v4();
        let token = jwt_service.create_token(user_id, 1, None).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().user_type, 1);
    }

    #[test]
    fn test_no_auth_header() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }
}
