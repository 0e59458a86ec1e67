// handlers/protected/auth.rs - GET /api/auth/admin/me handler

use axum::Extension;
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthAdmin};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub admin: AuthAdmin,
}

/// GET /api/auth/admin/me - Echo the admin identity carried by the token
///
/// Expected Output:
/// ```json
/// { "admin": { "id": "uuid", "email": "a@b.com", "role": "admin", "type": "admin" } }
/// ```
///
/// Token checks happen in `admin_auth_middleware`; no database lookup is made.
pub async fn admin_me(Extension(admin): Extension<AuthAdmin>) -> ApiResult<MeResponse> {
    Ok(ApiResponse::success(MeResponse { admin }))
}
