//! Database record models matching table schemas.
//!
//! Each entity has three shapes: a create request, an update request and a
//! response. Requests carry exactly what repositories are allowed to write;
//! in particular the user request types only have a `password_hash` field,
//! so a caller cannot hand a repository plaintext by accident. Responses are
//! what queries return, including server-generated columns.

pub mod comments;
pub mod posts;
pub mod users;
