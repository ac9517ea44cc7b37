//! Common type definitions.
//!
//! Entity IDs are server-generated integers (`SERIAL` columns), wrapped in
//! type aliases so signatures say which entity they refer to.

/// User account identifier.
pub type UserId = i32;

/// Post identifier.
pub type PostId = i32;

/// Comment identifier.
pub type CommentId = i32;
