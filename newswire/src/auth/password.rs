//! Password hashing and verification.
//!
//! Hashing uses Argon2id with a fixed work-factor parameter set from
//! [`Argon2Settings`]; every call draws a fresh random salt, so hashing the
//! same plaintext twice yields different stored values. Verification reads
//! the parameters back out of the stored hash string, which lets the
//! configured work factor be raised later without invalidating existing
//! credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::Argon2Settings;
use crate::errors::Error;

fn argon2_from(settings: Argon2Settings) -> Result<Argon2<'static>, Error> {
    let params = Params::new(settings.memory_kib, settings.iterations, settings.parallelism, None).map_err(|e| Error::Internal {
        operation: format!("create argon2 params: {e}"),
    })?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext credential with the given work-factor settings.
pub fn hash_password(plaintext: &str, settings: Argon2Settings) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_from(settings)?;

    let hash = argon2.hash_password(plaintext.as_bytes(), &salt).map_err(|e| Error::Internal {
        operation: format!("hash credential: {e}"),
    })?;

    Ok(hash.to_string())
}

/// Hash a plaintext credential with the default work-factor settings.
pub fn hash_password_default(plaintext: &str) -> Result<String, Error> {
    hash_password(plaintext, Argon2Settings::default())
}

/// Verify a plaintext credential against a stored hash.
///
/// Comparison is constant-time with respect to the candidate input.
/// Verification uses the parameters embedded in the hash itself.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(stored).map_err(|e| Error::Internal {
        operation: format!("parse stored hash: {e}"),
    })?;

    Ok(Argon2::default().verify_password(plaintext.as_bytes(), &parsed_hash).is_ok())
}
