/// Database access layer
///
/// This module provides:
/// - The `PostStore` trait the controller depends on
/// - `PgPostStore`, backed by PostgreSQL through sqlx
/// - `InMemoryPostStore`, for tests and database-less local runs
/// - Connection pool creation and embedded migrations
pub mod memory;
pub mod post_repo;

pub use memory::InMemoryPostStore;
pub use post_repo::PgPostStore;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::Post;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

/// Persistence operations over the posts collection.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, oldest first.
    async fn fetch_all(&self) -> Result<Vec<Post>>;

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>>;

    /// Insert when `post.id` is `None`, otherwise overwrite the stored row.
    ///
    /// Returns the post as stored, with `id` and timestamps filled in.
    /// Saving a post whose row no longer exists fails with `NotFound`.
    async fn save(&self, post: Post) -> Result<Post>;

    /// Fails with `NotFound` when the post is not stored.
    async fn delete_one(&self, post: &Post) -> Result<()>;

    /// Remove every post; returns how many were removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Cheap liveness probe used by the readiness endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Create a PostgreSQL connection pool and verify it with a round trip.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        sqlx::query("SELECT 1").execute(&pool),
    )
    .await
    {
        Ok(Ok(_)) => {
            info!("Database pool created and verified successfully");
            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(error = %e, "Database connection verification failed");
            Err(e.into())
        }
        Err(_) => {
            error!(
                timeout_secs = config.connect_timeout_secs,
                "Database connection verification timeout"
            );
            Err(crate::error::AppError::DatabaseError(
                "database verification timeout".to_string(),
            ))
        }
    }
}

/// Apply the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}
