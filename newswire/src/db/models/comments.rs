//! Database models for comments.

use crate::types::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new comment
#[derive(Debug, Clone)]
pub struct CommentCreateDBRequest {
    pub comment_text: String,
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Database request for updating a comment
#[derive(Debug, Clone, Default)]
pub struct CommentUpdateDBRequest {
    pub comment_text: Option<String>,
}

/// Database response for a comment
#[derive(Debug, Clone)]
pub struct CommentDBResponse {
    pub id: CommentId,
    pub comment_text: String,
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
