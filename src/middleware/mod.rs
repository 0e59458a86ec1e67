pub mod auth;
pub mod response;

pub use auth::{admin_auth_middleware, extract_bearer_token, AuthAdmin};
pub use response::{ApiResponse, ApiResult};
