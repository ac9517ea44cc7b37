//! Administrative subcommands.
//!
//! Each subcommand opens the pool, runs one unit of work through the service
//! layer and exits. The `verify` subcommand reports through the exit status
//! so it can be scripted.

use clap::Subcommand;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::db::handlers::{comments::CommentFilter, users::UserFilter};
use crate::errors::{Error, Result};
use crate::service::{
    comments::NewComment,
    posts::NewPost,
    users::{NewUser, UserUpdate},
    CommentService, PostService, UserService,
};
use crate::types::PostId;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account (the password is hashed before storage)
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Set a new password for an existing account
    SetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check a credential pair; exits non-zero when it does not match
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List user accounts
    ListUsers,
    /// Share a post as an existing user
    AddPost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Email of the authoring user
        #[arg(long)]
        email: String,
    },
    /// Comment on a post as an existing user
    AddComment {
        #[arg(long)]
        post_id: PostId,
        /// Email of the commenting user
        #[arg(long)]
        email: String,
        #[arg(long)]
        text: String,
    },
    /// Print the comment thread for a post
    ShowThread {
        #[arg(long)]
        post_id: PostId,
    },
}

async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| Error::Database(e.into()))
}

async fn require_user(users: &UserService, email: &str) -> Result<crate::db::models::users::UserDBResponse> {
    users.get_user_by_email(email).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: email.to_string(),
    })
}

/// Run one subcommand against the configured database.
pub async fn run(config: Config, command: Command) -> Result<()> {
    let pool = connect(&config).await?;
    let users = UserService::new(pool.clone(), config.password.clone());

    match command {
        Command::Migrate => {
            crate::MIGRATOR.run(&pool).await.map_err(|e| Error::Internal {
                operation: format!("run migrations: {e}"),
            })?;
            tracing::info!("migrations applied");
        }
        Command::CreateUser { username, email, password } => {
            let user = users.create_user(NewUser { username, email, password }).await?;
            println!("created user {} (id {})", user.username, user.id);
        }
        Command::SetPassword { email, password } => {
            let user = require_user(&users, &email).await?;
            users
                .update_user(
                    user.id,
                    UserUpdate {
                        password: Some(password),
                        ..Default::default()
                    },
                )
                .await?;
            println!("password updated for {email}");
        }
        Command::Verify { email, password } => {
            let user = users.authenticate(&email, &password).await?;
            println!("credentials valid for {} (id {})", user.username, user.id);
        }
        Command::ListUsers => {
            for user in users.list_users(UserFilter::default()).await? {
                println!("{}\t{}\t{}", user.id, user.username, user.email);
            }
        }
        Command::AddPost { title, url, email } => {
            let author = require_user(&users, &email).await?;
            let post = PostService::new(pool)
                .share_post(NewPost {
                    title,
                    post_url: url,
                    user_id: author.id,
                })
                .await?;
            println!("created post {} (id {})", post.title, post.id);
        }
        Command::AddComment { post_id, email, text } => {
            let author = require_user(&users, &email).await?;
            let comment = CommentService::new(pool)
                .post_comment(NewComment {
                    comment_text: text,
                    user_id: author.id,
                    post_id,
                })
                .await?;
            println!("created comment {} on post {}", comment.id, post_id);
        }
        Command::ShowThread { post_id } => {
            for comment in CommentService::new(pool).list_comments(CommentFilter::for_post(post_id)).await? {
                println!("[{}] user {}: {}", comment.created_at, comment.user_id, comment.comment_text);
            }
        }
    }

    Ok(())
}
