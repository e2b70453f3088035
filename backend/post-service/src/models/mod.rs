/// Data models for post-service
///
/// - `Post`: the stored entity
/// - `CreatePostRequest`: full payload, used by create and replace
/// - `UpdatePostRequest`: partial payload, used by update
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A post as stored and returned by the API.
///
/// `id` and the timestamps are assigned by the store; a freshly decoded post
/// has none of them until its first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Merge the fields present in `update` onto this post.
    pub fn apply_update(&mut self, update: UpdatePostRequest) {
        if let Some(content) = update.content {
            self.content = content;
        }
    }

    /// Overwrite every client-writable field with `replacement`.
    ///
    /// `id` and `created_at` are owned by the store and survive.
    pub fn replace_with(&mut self, replacement: CreatePostRequest) {
        let CreatePostRequest { content } = replacement;
        self.content = content;
    }
}

impl From<CreatePostRequest> for Post {
    fn from(req: CreatePostRequest) -> Self {
        Post::new(req.content)
    }
}

/// Create/replace payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// Partial update payload; absent or null fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(content: &str) -> Post {
        Post {
            id: Some(Uuid::new_v4()),
            content: content.to_string(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn apply_update_changes_only_present_fields() {
        let mut post = stored("hello");
        let before = post.clone();

        post.apply_update(UpdatePostRequest {
            content: Some("bye".to_string()),
        });

        assert_eq!(post.content, "bye");
        assert_eq!(post.id, before.id);
        assert_eq!(post.created_at, before.created_at);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut post = stored("hello");
        let before = post.clone();

        post.apply_update(UpdatePostRequest::default());

        assert_eq!(post, before);
    }

    #[test]
    fn replace_keeps_store_owned_fields() {
        let mut post = stored("hello");
        let id = post.id;
        let created_at = post.created_at;

        post.replace_with(CreatePostRequest {
            content: "y".to_string(),
        });

        assert_eq!(post.content, "y");
        assert_eq!(post.id, id);
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn unsaved_post_serializes_without_id() {
        let value = serde_json::to_value(Post::new("draft")).unwrap();
        assert_eq!(value, serde_json::json!({ "content": "draft" }));
    }

    #[test]
    fn create_request_rejects_empty_content() {
        let req = CreatePostRequest {
            content: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_accepts_missing_content() {
        let req: UpdatePostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert!(req.content.is_none());
    }
}
