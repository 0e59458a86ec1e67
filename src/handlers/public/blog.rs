// handlers/public/blog.rs - GET /api/blog/posts/:slug handler

use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::BlogPost;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/blog/posts/:slug - show a published post with its author
///
/// Drafts and posts without a publication date are reported as missing.
pub async fn post_get(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<BlogPost> {
    let post = state
        .store
        .find_published_post(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog post not found"))?;

    Ok(ApiResponse::success(post))
}
