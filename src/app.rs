use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, ConfigError, Environment};
use crate::database::ContentStore;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::admin_auth_middleware;

/// Application context built once at startup and shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ContentStore>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ContentStore>) -> Result<Self, ConfigError> {
        let jwt = JwtKeys::new(config.signing_secret()?, config.jwt_expiry_hours()?);

        Ok(Self {
            config: Arc::new(config),
            store,
            jwt,
        })
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(root))
        .merge(public_routes())
        // Admin token required
        .merge(protected_routes(state.clone()))
        .fallback(not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/admin/login", post(public::auth::admin_login))
        .route("/api/auth/logout", post(public::auth::logout))
        .route("/api/blog/posts/:slug", get(public::blog::post_get))
        .route("/api/career-postings/:id", get(public::careers::posting_get))
        .route("/api/health", get(public::health::health))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/admin/me", get(protected::auth::admin_me))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Estate API",
        "version": version,
        "description": "Property, blog and career content API",
        "endpoints": {
            "login": "POST /api/auth/admin/login (public - token acquisition)",
            "me": "GET /api/auth/admin/me (admin token)",
            "logout": "POST /api/auth/logout (public)",
            "blog": "GET /api/blog/posts/:slug (public)",
            "careers": "GET /api/career-postings/:id (public)",
            "health": "GET /api/health (public)",
        }
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
