//! Post write paths.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::handlers::{posts::PostFilter, Posts, Repository};
use crate::db::models::posts::{PostCreateDBRequest, PostDBResponse};
use crate::errors::{Error, Result};
use crate::types::{PostId, UserId};

/// A new post as submitted by a caller.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub post_url: String,
    pub user_id: UserId,
}

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, new_post), fields(user_id = new_post.user_id), err)]
    pub async fn share_post(&self, new_post: NewPost) -> Result<PostDBResponse> {
        if new_post.title.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "Post title must not be empty".to_string(),
            });
        }
        if new_post.post_url.trim().is_empty() {
            return Err(Error::BadRequest {
                message: "Post URL must not be empty".to_string(),
            });
        }
        // The user reference is checked by the foreign key; no pre-read needed
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let post = Posts::new(&mut conn)
            .create(&PostCreateDBRequest {
                title: new_post.title,
                post_url: new_post.post_url,
                user_id: new_post.user_id,
            })
            .await?;

        Ok(post)
    }

    #[instrument(skip(self), err)]
    pub async fn get_post(&self, id: PostId) -> Result<Option<PostDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Posts::new(&mut conn).get_by_id(id).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn list_posts(&self, filter: PostFilter) -> Result<Vec<PostDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Posts::new(&mut conn).list(&filter).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_post(&self, id: PostId) -> Result<bool> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Posts::new(&mut conn).delete(id).await?)
    }
}
