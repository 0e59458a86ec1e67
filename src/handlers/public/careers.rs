// handlers/public/careers.rs - GET /api/career-postings/:id handler

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::CareerPosting;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

const NOT_FOUND_MESSAGE: &str = "Career posting not found or not active";

/// GET /api/career-postings/:id - show an active career posting
pub async fn posting_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CareerPosting> {
    // An id that cannot name any row is indistinguishable from a missing one
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::not_found(NOT_FOUND_MESSAGE))?;

    let posting = state
        .store
        .find_active_career_posting(id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;

    Ok(ApiResponse::success(posting))
}
