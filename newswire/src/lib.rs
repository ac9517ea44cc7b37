//! # newswire: user and comment persistence with credential hashing
//!
//! `newswire` is the relational persistence layer for a small link-sharing
//! application: user accounts, posts and comment threads backed by
//! PostgreSQL. Its one piece of real behavior is the credential guard — the
//! guarantee that a caller-supplied plaintext password is replaced by a
//! salted Argon2id hash before any insert or update commits, on every write
//! path, with a matching constant-time verification for login.
//!
//! ## Architecture
//!
//! The crate is layered the usual way for a SQLx application:
//!
//! - [`service`] owns the write paths. Each operation composes validation,
//!   credential hashing (where it applies) and a repository call explicitly,
//!   so the transformation step is visible and testable rather than hidden in
//!   a framework hook. Hashing runs on `spawn_blocking` threads because the
//!   work factor makes it CPU-bound by design.
//! - [`db`] holds the repository implementations ([`db::handlers`]) and the
//!   record models ([`db::models`]). Repositories borrow a connection passed
//!   in by the caller; there is no global database handle.
//! - [`auth::password`] wraps Argon2id hashing and verification. The work
//!   factor comes from configuration; verification always uses the
//!   parameters embedded in the stored hash.
//! - [`config`] loads YAML + environment configuration via figment,
//!   including the update-path rehash policy: by default an update that
//!   supplies a credential always re-hashes it (matching the legacy
//!   application), but [`config::RehashPolicy::IfChanged`] skips the rewrite
//!   when the supplied plaintext already matches the stored hash.
//!
//! ## Example
//!
//! ```ignore
//! use newswire::service::{users::NewUser, UserService};
//!
//! async fn example(pool: sqlx::PgPool, config: newswire::Config) -> newswire::errors::Result<()> {
//!     let users = UserService::new(pool, config.password);
//!     let user = users
//!         .create_user(NewUser {
//!             username: "alice".into(),
//!             email: "alice@example.com".into(),
//!             password: "pass1234".into(),
//!         })
//!         .await?;
//!     // user.password_hash is an opaque Argon2id string, never "pass1234"
//!     users.authenticate("alice@example.com", "pass1234").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod service;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use errors::Error;

/// Database migrations, embedded at compile time from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
