/// Post handlers - the posts resource controller
use super::decode::decode_body;
use super::resource::ResourceController;
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, Post, UpdatePostRequest};
use crate::views::ViewRenderer;
use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Controller for `/posts`, built from its two collaborators.
pub struct PostsController {
    store: Arc<dyn PostStore>,
    views: Arc<dyn ViewRenderer>,
}

impl PostsController {
    pub fn new(store: Arc<dyn PostStore>, views: Arc<dyn ViewRenderer>) -> Self {
        Self { store, views }
    }

    pub fn store(&self) -> Arc<dyn PostStore> {
        self.store.clone()
    }
}

#[async_trait(?Send)]
impl ResourceController for PostsController {
    const NAME: &'static str = "posts";

    type Entity = Post;
    type Id = Uuid;

    async fn resolve(&self, id: Uuid) -> Result<Post> {
        self.store
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    /// Render the index page listing every post
    async fn index(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let posts = self.store.fetch_all().await?;
        self.views
            .render("index", serde_json::json!({ "posts": posts }), req)
            .await
    }

    /// Create a new post
    async fn create(&self, req: &HttpRequest, body: web::Bytes) -> Result<HttpResponse> {
        let payload: CreatePostRequest = decode_body(req, &body)?;
        let post = self.store.save(Post::from(payload)).await?;

        tracing::info!(post_id = ?post.id, "post created");
        Ok(HttpResponse::Ok().json(post))
    }

    /// Get a post by ID
    async fn show(&self, _req: &HttpRequest, post: Post) -> Result<HttpResponse> {
        Ok(HttpResponse::Ok().json(post))
    }

    /// Merge the fields present in the body onto the post
    async fn update(
        &self,
        req: &HttpRequest,
        mut post: Post,
        body: web::Bytes,
    ) -> Result<HttpResponse> {
        let changes: UpdatePostRequest = decode_body(req, &body)?;
        post.apply_update(changes);
        let post = self.store.save(post).await?;

        tracing::info!(post_id = ?post.id, "post updated");
        Ok(HttpResponse::Ok().json(post))
    }

    /// Replace the post's client-writable fields with the body
    async fn replace(
        &self,
        req: &HttpRequest,
        mut post: Post,
        body: web::Bytes,
    ) -> Result<HttpResponse> {
        let replacement: CreatePostRequest = decode_body(req, &body)?;
        post.replace_with(replacement);
        let post = self.store.save(post).await?;

        tracing::info!(post_id = ?post.id, "post replaced");
        Ok(HttpResponse::Ok().json(post))
    }

    /// Delete a post
    async fn delete(&self, _req: &HttpRequest, post: Post) -> Result<HttpResponse> {
        self.store.delete_one(&post).await?;

        tracing::info!(post_id = ?post.id, "post deleted");
        Ok(HttpResponse::Ok().finish())
    }

    /// Delete every post. There is no confirmation step.
    async fn clear(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let removed = self.store.delete_all().await?;

        let peer = req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        tracing::warn!(removed, %peer, "all posts cleared");
        Ok(HttpResponse::Ok().finish())
    }
}
