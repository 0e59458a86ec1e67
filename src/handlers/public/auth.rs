// handlers/public/auth.rs - Admin login and logout

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::{authenticate_admin, generate_token, Claims};
use crate::database::models::PublicAdmin;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields present and non-empty, email trimmed
    fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub admin: PublicAdmin,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/auth/admin/login - Authenticate an admin and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "message": "Login successful",
///   "admin": { "id": "uuid", "email": "a@b.com", "name": null, "role": "admin", ... },
///   "token": "eyJhbGciOiJIUzI1NiI..."
/// }
/// ```
///
/// Errors: 400 missing fields, 401 bad credentials, 500 anything else.
pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Login body rejected: {}", rejection);
            LoginRequest::default()
        }
    };

    let (email, password) = request
        .credentials()
        .ok_or_else(|| ApiError::bad_request("Email and password are required"))?;

    let admin = authenticate_admin(state.store.as_ref(), email, password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let claims = Claims::for_admin(&admin, state.jwt.expiry_hours)?;
    let token = generate_token(&claims, &state.jwt)?;

    tracing::info!("Admin {} logged in", admin.email);

    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful",
        admin: PublicAdmin::from(admin),
        token,
    }))
}

/// POST /api/auth/logout - Acknowledge logout
///
/// Tokens are stateless; clients drop their copy. Nothing is revoked server-side.
pub async fn logout() -> ApiResult<MessageResponse> {
    tracing::debug!("Logout requested");
    Ok(ApiResponse::success(MessageResponse {
        message: "Logout successful",
    }))
}
