use super::PostStore;
use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local `PostStore`. Contents vanish with the process.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(posts)
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post> {
        let now = Utc::now();
        let mut posts = self.posts.write().await;

        match post.id {
            None => {
                let id = Uuid::new_v4();
                post.id = Some(id);
                post.created_at = Some(now);
                post.updated_at = Some(now);
                posts.insert(id, post.clone());
            }
            Some(id) => {
                let existing = posts
                    .get_mut(&id)
                    .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
                post.created_at = existing.created_at;
                post.updated_at = Some(now);
                *existing = post.clone();
            }
        }

        Ok(post)
    }

    async fn delete_one(&self, post: &Post) -> Result<()> {
        let id = post
            .id
            .ok_or_else(|| AppError::NotFound("post has not been saved".to_string()))?;

        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
