// Shared fixtures: an in-memory content store and an in-process router.
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use estate_api::auth::password::hash_password;
use estate_api::config::AppConfig;
use estate_api::database::models::{Admin, Author, BlogPost, CareerPosting};
use estate_api::database::{ContentStore, DatabaseError};
use estate_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "a@b.com";
pub const ADMIN_PASSWORD: &str = "x";

/// Content store backed by vectors, applying the same visibility rules as Postgres
#[derive(Default)]
pub struct MemoryStore {
    pub admins: Vec<Admin>,
    pub posts: Vec<BlogPost>,
    pub postings: Vec<CareerPosting>,
    pub properties: i64,
    pub unreachable: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), DatabaseError> {
        if self.unreachable {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DatabaseError> {
        self.check()?;
        Ok(self.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, DatabaseError> {
        self.check()?;
        Ok(self
            .posts
            .iter()
            .find(|p| p.slug == slug && p.is_published && p.published_at.is_some())
            .cloned())
    }

    async fn find_active_career_posting(&self, id: Uuid) -> Result<Option<CareerPosting>, DatabaseError> {
        self.check()?;
        Ok(self.postings.iter().find(|p| p.id == id && p.is_active).cloned())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }

    async fn count_properties(&self) -> Result<i64, DatabaseError> {
        self.check()?;
        Ok(self.properties)
    }
}

pub fn admin(email: &str, password: &str) -> Admin {
    Admin {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: Some("Site Admin".to_string()),
        password: hash_password(password).expect("hash fixture password"),
        role: "admin".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn post(slug: &str, is_published: bool, published: bool) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: format!("Post {}", slug),
        excerpt: Some("Market update".to_string()),
        content: "Prices are up.".to_string(),
        cover_image: None,
        tags: vec!["market".to_string()],
        is_published,
        published_at: published.then(|| Utc::now() - Duration::days(1)),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        author: Author {
            id: Uuid::new_v4(),
            name: Some("Ana Writer".to_string()),
            email: "ana@example.com".to_string(),
            image: None,
        },
    }
}

pub fn posting(is_active: bool) -> CareerPosting {
    CareerPosting {
        id: Uuid::new_v4(),
        title: "Real Estate Agent".to_string(),
        department: Some("Sales".to_string()),
        location: "Lisbon".to_string(),
        employment_type: "FULL_TIME".to_string(),
        salary_range: None,
        description: "Show homes.".to_string(),
        requirements: vec!["License".to_string()],
        benefits: vec![],
        is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Development config with a fixed signing secret
pub fn config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = Some(JWT_SECRET.to_string());
    config.database.url = Some("postgres://estate@localhost/estate".to_string());
    config
}

pub fn router(store: MemoryStore) -> Router {
    let state = AppState::new(config(), Arc::new(store)).expect("valid test config");
    app(state)
}

/// Router seeded with one admin (`a@b.com` / `x`)
pub fn seeded_router() -> Router {
    router(MemoryStore {
        admins: vec![admin(ADMIN_EMAIL, ADMIN_PASSWORD)],
        ..Default::default()
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(router: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(TestResponse { status, body })
}

pub async fn get(router: &Router, uri: &str) -> Result<TestResponse> {
    send(router, Request::builder().uri(uri).body(Body::empty())?).await
}

pub async fn get_with_auth(router: &Router, uri: &str, authorization: &str) -> Result<TestResponse> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())?;
    send(router, request).await
}

pub async fn post_json(router: &Router, uri: &str, body: &Value) -> Result<TestResponse> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;
    send(router, request).await
}

pub async fn post_empty(router: &Router, uri: &str) -> Result<TestResponse> {
    let request = Request::builder().method(Method::POST).uri(uri).body(Body::empty())?;
    send(router, request).await
}
