mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::MemoryStore;

#[tokio::test]
async fn published_post_is_returned_with_author() -> Result<()> {
    let router = common::router(MemoryStore {
        posts: vec![common::post("spring-market", true, true)],
        ..Default::default()
    });

    let res = common::get(&router, "/api/blog/posts/spring-market").await?;

    assert_eq!(res.status, StatusCode::OK, "unexpected body: {}", res.body);
    assert_eq!(res.body["slug"], "spring-market");
    assert_eq!(res.body["isPublished"], true);
    assert!(res.body["publishedAt"].is_string());
    assert_eq!(res.body["author"]["name"], "Ana Writer");
    assert!(res.body["author"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn unpublished_posts_are_not_found() -> Result<()> {
    let router = common::router(MemoryStore {
        posts: vec![
            common::post("draft", false, false),
            common::post("scheduled", false, true),
            common::post("undated", true, false),
        ],
        ..Default::default()
    });

    for slug in ["draft", "scheduled", "undated", "missing"] {
        let res = common::get(&router, &format!("/api/blog/posts/{}", slug)).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "slug {} gave {}", slug, res.body);
        assert_eq!(res.body, json!({ "error": "Blog post not found" }));
    }
    Ok(())
}

#[tokio::test]
async fn active_career_posting_is_returned() -> Result<()> {
    let active = common::posting(true);
    let id = active.id;
    let router = common::router(MemoryStore {
        postings: vec![active],
        ..Default::default()
    });

    let res = common::get(&router, &format!("/api/career-postings/{}", id)).await?;

    assert_eq!(res.status, StatusCode::OK, "unexpected body: {}", res.body);
    assert_eq!(res.body["id"], id.to_string());
    assert_eq!(res.body["isActive"], true);
    assert_eq!(res.body["employmentType"], "FULL_TIME");
    Ok(())
}

#[tokio::test]
async fn inactive_or_unknown_career_postings_are_not_found() -> Result<()> {
    let inactive = common::posting(false);
    let inactive_id = inactive.id;
    let router = common::router(MemoryStore {
        postings: vec![inactive],
        ..Default::default()
    });

    for id in [inactive_id.to_string(), Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let res = common::get(&router, &format!("/api/career-postings/{}", id)).await?;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "id {} gave {}", id, res.body);
        assert_eq!(res.body, json!({ "error": "Career posting not found or not active" }));
    }
    Ok(())
}

#[tokio::test]
async fn content_store_failure_is_generic_500() -> Result<()> {
    let router = common::router(MemoryStore {
        unreachable: true,
        ..Default::default()
    });

    let res = common::get(&router, "/api/blog/posts/anything").await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "error": "Internal server error" }));

    let res = common::get(&router, &format!("/api/career-postings/{}", Uuid::new_v4())).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
