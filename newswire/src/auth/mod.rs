//! Credential handling.
//!
//! The only secret this application stores is the user credential, and the
//! invariant the [`password`] module owns is simple: plaintext never reaches
//! the database. The service layer composes validation, hashing and the
//! repository call explicitly; there is no framework hook doing it behind the
//! scenes.

pub mod password;
