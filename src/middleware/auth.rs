use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{verify_token, Claims, ADMIN_TOKEN_TYPE};
use crate::error::ApiError;

/// Authenticated admin context extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthAdmin {
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        let role = if claims.role.is_empty() {
            ADMIN_TOKEN_TYPE.to_string()
        } else {
            claims.role
        };

        Self {
            id: claims.id,
            email: claims.email,
            role,
            token_type: ADMIN_TOKEN_TYPE.to_string(),
        }
    }
}

/// Admin token middleware: validates the bearer token and injects [`AuthAdmin`]
///
/// - missing or non-Bearer header: 401 `No token provided`
/// - bad signature, expired, malformed, or non-admin token: 403 `Forbidden`
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(request.headers())
            .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

        verify_token(token, &state.jwt).map_err(|e| {
            tracing::warn!("Admin token rejected: {}", e);
            ApiError::forbidden("Forbidden")
        })?
    };

    if claims.token_type != ADMIN_TOKEN_TYPE {
        tracing::warn!("Token for {} has type '{}', admin required", claims.email, claims.token_type);
        return Err(ApiError::forbidden("Forbidden"));
    }

    request.extensions_mut().insert(AuthAdmin::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
