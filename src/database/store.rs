use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Admin, BlogPost, BlogPostRow, CareerPosting};

/// Read access to the site content used by the HTTP handlers
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up an admin account by email, password hash included
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DatabaseError>;

    /// Look up a visible post by slug, joined to its author's public fields.
    /// Visible means `is_published` with a non-null `published_at`.
    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, DatabaseError>;

    /// Look up a career posting by id, only if `is_active`
    async fn find_active_career_posting(&self, id: Uuid) -> Result<Option<CareerPosting>, DatabaseError>;

    /// Trivial liveness query
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn count_properties(&self) -> Result<i64, DatabaseError>;
}

/// Postgres-backed content store
pub struct PgStore {
    database: Arc<DatabaseManager>,
}

impl PgStore {
    pub fn new(database: Arc<DatabaseManager>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DatabaseError> {
        let pool = self.database.pool().await?;

        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, name, password, role, created_at, updated_at
             FROM admins
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(admin)
    }

    async fn find_published_post(&self, slug: &str) -> Result<Option<BlogPost>, DatabaseError> {
        let pool = self.database.pool().await?;

        // Author columns are an explicit allow-list; credentials are never selected
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT
                p.id, p.slug, p.title, p.excerpt, p.content, p.cover_image, p.tags,
                p.is_published, p.published_at, p.created_at, p.updated_at,
                u.id AS author_id,
                u.name AS author_name,
                u.email AS author_email,
                u.image AS author_image
            FROM blog_posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.slug = $1
            AND p.is_published = true
            AND p.published_at IS NOT NULL
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    async fn find_active_career_posting(&self, id: Uuid) -> Result<Option<CareerPosting>, DatabaseError> {
        let pool = self.database.pool().await?;

        let posting = sqlx::query_as::<_, CareerPosting>(
            r#"
            SELECT
                id, title, department, location, employment_type, salary_range,
                description, requirements, benefits, is_active, created_at, updated_at
            FROM career_postings
            WHERE id = $1
            AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(posting)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.database.health_check().await
    }

    async fn count_properties(&self) -> Result<i64, DatabaseError> {
        let pool = self.database.pool().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
