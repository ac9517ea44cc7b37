//! Comment write paths.
//!
//! Comments carry no lifecycle behavior beyond referential association: the
//! body must be non-empty and the user/post references must exist. The
//! foreign keys are the authority on the latter; a violation surfaces as a
//! database error mapped to a caller-friendly message.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::handlers::{comments::CommentFilter, Comments, Repository};
use crate::db::models::comments::{CommentCreateDBRequest, CommentDBResponse, CommentUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::service::validate;
use crate::types::{CommentId, PostId, UserId};

/// A new comment as submitted by a caller.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub comment_text: String,
    pub user_id: UserId,
    pub post_id: PostId,
}

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, new_comment), fields(post_id = new_comment.post_id, user_id = new_comment.user_id), err)]
    pub async fn post_comment(&self, new_comment: NewComment) -> Result<CommentDBResponse> {
        validate::comment_text(&new_comment.comment_text)?;

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let comment = Comments::new(&mut conn)
            .create(&CommentCreateDBRequest {
                comment_text: new_comment.comment_text,
                user_id: new_comment.user_id,
                post_id: new_comment.post_id,
            })
            .await?;

        Ok(comment)
    }

    #[instrument(skip(self, comment_text), err)]
    pub async fn edit_comment(&self, id: CommentId, comment_text: String) -> Result<CommentDBResponse> {
        validate::comment_text(&comment_text)?;

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let comment = Comments::new(&mut conn)
            .update(
                id,
                &CommentUpdateDBRequest {
                    comment_text: Some(comment_text),
                },
            )
            .await?;

        Ok(comment)
    }

    #[instrument(skip(self), err)]
    pub async fn list_comments(&self, filter: CommentFilter) -> Result<Vec<CommentDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Comments::new(&mut conn).list(&filter).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_comment(&self, id: CommentId) -> Result<bool> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Comments::new(&mut conn).delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Argon2Settings, PasswordConfig};
    use crate::db::errors::DbError;
    use crate::service::posts::{NewPost, PostService};
    use crate::service::users::{NewUser, UserService};
    use sqlx::PgPool;

    async fn seed(pool: &PgPool) -> (UserId, PostId) {
        let users = UserService::new(
            pool.clone(),
            PasswordConfig {
                argon2: Argon2Settings {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                },
                ..Default::default()
            },
        );
        let user = users
            .create_user(NewUser {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
                password: "pass1234".to_string(),
            })
            .await
            .unwrap();

        let post = PostService::new(pool.clone())
            .share_post(NewPost {
                title: "Interesting link".to_string(),
                post_url: "https://example.com/link".to_string(),
                user_id: user.id,
            })
            .await
            .unwrap();

        (user.id, post.id)
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_post_and_list_comments(pool: PgPool) {
        let (user_id, post_id) = seed(&pool).await;
        let service = CommentService::new(pool);

        service
            .post_comment(NewComment {
                comment_text: "Nice find".to_string(),
                user_id,
                post_id,
            })
            .await
            .unwrap();

        let thread = service.list_comments(CommentFilter::for_post(post_id)).await.unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].comment_text, "Nice find");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_empty_comment_rejected_before_db(pool: PgPool) {
        let (user_id, post_id) = seed(&pool).await;
        let service = CommentService::new(pool);

        let err = service
            .post_comment(NewComment {
                comment_text: "  ".to_string(),
                user_id,
                post_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_dangling_references_are_reported(pool: PgPool) {
        let (user_id, post_id) = seed(&pool).await;
        let service = CommentService::new(pool);

        let err = service
            .post_comment(NewComment {
                comment_text: "ghost thread".to_string(),
                user_id,
                post_id: post_id + 77,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(DbError::ForeignKeyViolation { .. })));
        assert_eq!(err.user_message(), "Comment must reference an existing user and post");
    }
}
