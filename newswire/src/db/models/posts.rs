//! Database models for posts.

use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new post
#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub title: String,
    pub post_url: String,
    pub user_id: UserId,
}

/// Database request for updating a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostUpdateDBRequest {
    pub title: Option<String>,
    pub post_url: Option<String>,
}

/// Database response for a post
#[derive(Debug, Clone)]
pub struct PostDBResponse {
    pub id: PostId,
    pub title: String,
    pub post_url: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
