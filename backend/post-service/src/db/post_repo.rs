use super::PostStore;
use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// `PostStore` over the `posts` table.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, content, created_at, updated_at
            FROM posts
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn save(&self, post: Post) -> Result<Post> {
        match post.id {
            None => {
                let created = sqlx::query_as::<_, Post>(
                    r#"
                    INSERT INTO posts (content)
                    VALUES ($1)
                    RETURNING id, content, created_at, updated_at
                    "#,
                )
                .bind(&post.content)
                .fetch_one(&self.pool)
                .await?;

                Ok(created)
            }
            Some(id) => {
                let updated = sqlx::query_as::<_, Post>(
                    r#"
                    UPDATE posts
                    SET content = $2, updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, content, created_at, updated_at
                    "#,
                )
                .bind(id)
                .bind(&post.content)
                .fetch_optional(&self.pool)
                .await?;

                updated.ok_or_else(|| AppError::NotFound(format!("post {}", id)))
            }
        }
    }

    async fn delete_one(&self, post: &Post) -> Result<()> {
        let id = post
            .id
            .ok_or_else(|| AppError::NotFound("post has not been saved".to_string()))?;

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {}", id)));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
