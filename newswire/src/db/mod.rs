//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL,
//! following the repository pattern.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Connections
//!
//! Repositories borrow a `&mut PgConnection` for the duration of a unit of
//! work. Acquire from a pool (or begin a transaction) at the call site and
//! release when done; see [`crate::service`] for the write paths that do
//! this.
//!
//! # Migrations
//!
//! Schema migrations live in `migrations/` and are exposed through
//! [`crate::MIGRATOR`]:
//!
//! ```ignore
//! newswire::MIGRATOR.run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
