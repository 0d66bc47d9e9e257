//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use authkey::{AuthkeyOptions, AuthkeyService};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    health_handler, login_handler, logout_handler, patient_list_handler, register_handler,
    verify_otp_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    pub sms: Option<Arc<AuthkeyService>>,
}

/// Build the Axum application router.
///
/// The SMS gateway client is only constructed in production; everywhere else
/// registration falls back to the configured default OTP.
pub fn build_app(pool: PgPool, config: Config) -> Result<Router> {
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_ttl()?));

    let sms = match (&config.authkey_api_key, &config.authkey_url) {
        (Some(api_key), Some(base_url)) if config.is_production() => {
            Some(Arc::new(AuthkeyService::new(AuthkeyOptions {
                api_key: api_key.clone(),
                base_url: base_url.clone(),
            })))
        }
        _ => None,
    };

    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        config: Arc::new(config),
        sms,
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/registration/register", post(register_handler))
        .route("/registration/verify-otp", post(verify_otp_handler))
        .route("/registration/login", post(login_handler))
        .route("/registration/logout", post(logout_handler))
        .route("/doctor/list", get(patient_list_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
