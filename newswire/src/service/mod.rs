//! Service layer: the explicit write paths.
//!
//! Every write composes the same three steps in the open, in order:
//! validation, transformation (credential hashing, where it applies), then
//! the repository call. The legacy application did the middle step inside a
//! framework lifecycle hook; here it is a plain function call, visible and
//! testable on its own.
//!
//! Services own a [`sqlx::PgPool`] handed to them at construction and acquire
//! a connection per unit of work. No global database handle exists anywhere
//! in the crate.

pub mod comments;
pub mod posts;
pub mod users;
pub mod validate;

pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;
