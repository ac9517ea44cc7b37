//! Database repository for comments.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::comments::{CommentCreateDBRequest, CommentDBResponse, CommentUpdateDBRequest},
    },
    types::{CommentId, PostId, UserId},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing comments, optionally restricted to one post or one author
#[derive(Debug, Clone)]
pub struct CommentFilter {
    pub post_id: Option<PostId>,
    pub user_id: Option<UserId>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self {
            post_id: None,
            user_id: None,
            skip: 0,
            limit: 100,
        }
    }
}

impl CommentFilter {
    pub fn for_post(post_id: PostId) -> Self {
        Self {
            post_id: Some(post_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct CommentRow {
    pub id: CommentId,
    pub comment_text: String,
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentDBResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            comment_text: row.comment_text,
            user_id: row.user_id,
            post_id: row.post_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct Comments<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Comments<'c> {
    type CreateRequest = CommentCreateDBRequest;
    type UpdateRequest = CommentUpdateDBRequest;
    type Response = CommentDBResponse;
    type Id = CommentId;
    type Filter = CommentFilter;

    #[instrument(skip(self, request), fields(post_id = request.post_id, user_id = request.user_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comment (comment_text, user_id, post_id)
            VALUES ($1, $2, $3)
            RETURNING id, comment_text, user_id, post_id, created_at, updated_at
            "#,
        )
        .bind(&request.comment_text)
        .bind(request.user_id)
        .bind(request.post_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, comment_text, user_id, post_id, created_at, updated_at FROM comment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, comment_text, user_id, post_id, created_at, updated_at
            FROM comment
            WHERE ($1::integer IS NULL OR post_id = $1)
              AND ($2::integer IS NULL OR user_id = $2)
            ORDER BY created_at ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.post_id)
        .bind(filter.user_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comment SET
                comment_text = COALESCE($2, comment_text),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, comment_text, user_id, post_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.comment_text)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comment WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Comments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}
