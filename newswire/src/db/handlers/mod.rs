//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection, provides strongly-typed
//! CRUD operations and returns models from [`crate::db::models`]. The
//! connection (or transaction) is always passed in by the caller; nothing in
//! this module holds a pool or a global handle.
//!
//! ```ignore
//! use newswire::db::handlers::{Repository, Users};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Users::new(&mut conn);
//!     if let Some(user) = repo.get_by_email("user@example.com").await? {
//!         println!("found {}", user.username);
//!     }
//!     Ok(())
//! }
//! ```

pub mod comments;
pub mod posts;
pub mod repository;
pub mod users;

pub use comments::Comments;
pub use posts::Posts;
pub use repository::Repository;
pub use users::Users;
