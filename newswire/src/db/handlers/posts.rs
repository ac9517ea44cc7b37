//! Database repository for posts.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::posts::{PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
    },
    types::{PostId, UserId},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Filter for listing posts, optionally restricted to a single author
#[derive(Debug, Clone)]
pub struct PostFilter {
    pub user_id: Option<UserId>,
    pub skip: i64,
    pub limit: i64,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            skip: 0,
            limit: 100,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
struct PostRow {
    pub id: PostId,
    pub title: String,
    pub post_url: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for PostDBResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            post_url: row.post_url,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct Posts<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Posts<'c> {
    type CreateRequest = PostCreateDBRequest;
    type UpdateRequest = PostUpdateDBRequest;
    type Response = PostDBResponse;
    type Id = PostId;
    type Filter = PostFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO post (title, post_url, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, post_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.post_url)
        .bind(request.user_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, PostRow>("SELECT id, title, post_url, user_id, created_at, updated_at FROM post WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, post_url, user_id, created_at, updated_at
            FROM post
            WHERE ($1::integer IS NULL OR user_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE post SET
                title = COALESCE($2, title),
                post_url = COALESCE($3, post_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, post_url, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.post_url)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Posts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}
