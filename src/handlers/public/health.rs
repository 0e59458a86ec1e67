// handlers/public/health.rs - GET /api/health handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::app::AppState;
use crate::database::DatabaseError;

/// GET /api/health - database liveness plus configuration presence flags
///
/// Unlike the other handlers, a failure here reports the underlying error
/// message; secrets are only ever reported as booleans.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match probe(&state).await {
        Ok(properties_count) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "propertiesCount": properties_count,
                "environment": state.config.environment_report(),
                "timestamp": timestamp,
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "error": e.to_string(),
                    "timestamp": timestamp,
                })),
            )
        }
    }
}

async fn probe(state: &AppState) -> Result<i64, DatabaseError> {
    state.store.ping().await?;
    state.store.count_properties().await
}
