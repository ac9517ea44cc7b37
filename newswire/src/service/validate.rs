//! Pre-write field validation.
//!
//! These checks run before any hashing or database work, so a rejected write
//! never costs a hash computation or a connection acquisition. Database
//! constraints (unique email, foreign keys, non-empty checks) remain the
//! final authority; this layer exists to give callers precise errors for the
//! common cases.

use crate::config::PasswordConfig;
use crate::errors::{Error, Result};

/// Reject empty or whitespace-only usernames.
pub fn username(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Username must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Check the email-address shape: exactly one `@`, a non-empty local part,
/// and a domain containing a dot. Deliverability is not this layer's problem.
pub fn email(value: &str) -> Result<()> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let shaped = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace);

    if !shaped {
        return Err(Error::BadRequest {
            message: "Email address is not valid".to_string(),
        });
    }
    Ok(())
}

/// Enforce plaintext credential length bounds before hashing.
pub fn password(value: &str, config: &PasswordConfig) -> Result<()> {
    if value.len() < config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", config.min_length),
        });
    }
    if value.len() > config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", config.max_length),
        });
    }
    Ok(())
}

/// Reject empty or whitespace-only comment bodies.
pub fn comment_text(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Comment text must not be empty".to_string(),
        });
    }
    Ok(())
}
