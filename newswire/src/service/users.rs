//! User write paths and authentication.
//!
//! This is where the hash-on-write invariant lives: both [`UserService::create_user`]
//! and [`UserService::update_user`] replace a supplied plaintext credential
//! with its Argon2id hash before anything reaches a repository, and a hashing
//! failure aborts the write. Hashing and verification run on blocking threads
//! via `tokio::task::spawn_blocking` so the expensive work does not stall the
//! async runtime.

use sqlx::PgPool;
use tracing::instrument;

use crate::auth::password;
use crate::config::{PasswordConfig, RehashPolicy};
use crate::db::handlers::{users::UserFilter, Repository, Users};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::service::validate;
use crate::types::UserId;

/// A new account as submitted by a caller. `password` is plaintext here and
/// nowhere else.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Caller-supplied account changes. A `Some` password is treated as freshly
/// supplied plaintext and goes through the credential guard.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    password: PasswordConfig,
}

impl UserService {
    pub fn new(pool: PgPool, password: PasswordConfig) -> Self {
        Self { pool, password }
    }

    async fn hash_on_worker(&self, plaintext: String) -> Result<String> {
        let settings = self.password.argon2;
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext, settings))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn credential hashing task: {e}"),
            })?
    }

    async fn verify_on_worker(plaintext: String, stored: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn credential verification task: {e}"),
            })?
    }

    /// Create a user: validate, hash the credential, insert.
    #[instrument(skip(self, new_user), fields(username = %new_user.username), err)]
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserDBResponse> {
        let NewUser { username, email, password } = new_user;

        validate::username(&username)?;
        validate::email(&email)?;
        validate::password(&password, &self.password)?;

        let password_hash = self.hash_on_worker(password).await?;

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let user = Users::new(&mut conn)
            .create(&UserCreateDBRequest {
                username,
                email,
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Update a user. A supplied password is validated and hashed before the
    /// row is touched; under [`RehashPolicy::IfChanged`] a plaintext that
    /// already matches the stored hash leaves the column alone.
    #[instrument(skip(self, update), err)]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<UserDBResponse> {
        let UserUpdate { username, email, password } = update;

        if let Some(username) = &username {
            validate::username(username)?;
        }
        if let Some(email) = &email {
            validate::email(email)?;
        }

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;

        let password_hash = match password {
            None => None,
            Some(plaintext) => {
                validate::password(&plaintext, &self.password)?;

                match self.password.rehash {
                    RehashPolicy::Always => Some(self.hash_on_worker(plaintext).await?),
                    RehashPolicy::IfChanged => {
                        let current = Users::new(&mut conn).get_by_id(id).await?.ok_or_else(|| Error::NotFound {
                            resource: "User".to_string(),
                            id: id.to_string(),
                        })?;

                        if Self::verify_on_worker(plaintext.clone(), current.password_hash).await? {
                            None
                        } else {
                            Some(self.hash_on_worker(plaintext).await?)
                        }
                    }
                }
            }
        };

        let user = Users::new(&mut conn)
            .update(
                id,
                &UserUpdateDBRequest {
                    username,
                    email,
                    password_hash,
                },
            )
            .await?;

        Ok(user)
    }

    /// Check an email/password pair against stored credentials.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which accounts exist.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, email: &str, plaintext: &str) -> Result<UserDBResponse> {
        let invalid = || Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        };

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let user = Users::new(&mut conn).get_by_email(email).await?.ok_or_else(invalid)?;
        drop(conn);

        let is_valid = Self::verify_on_worker(plaintext.to_string(), user.password_hash.clone()).await?;
        if !is_valid {
            return Err(invalid());
        }

        Ok(user)
    }

    #[instrument(skip(self), err)]
    pub async fn get_user(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Users::new(&mut conn).get_by_id(id).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Users::new(&mut conn).get_by_email(email).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Users::new(&mut conn).list(&filter).await?)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_user(&self, id: UserId) -> Result<bool> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Ok(Users::new(&mut conn).delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Argon2Settings;
    use crate::db::errors::DbError;
    use sqlx::PgPool;

    fn test_password_config(rehash: RehashPolicy) -> PasswordConfig {
        PasswordConfig {
            rehash,
            // Small work factor keeps the suite fast
            argon2: Argon2Settings {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            ..Default::default()
        }
    }

    fn service(pool: PgPool) -> UserService {
        UserService::new(pool, test_password_config(RehashPolicy::Always))
    }

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pass1234".to_string(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_stores_hash_not_plaintext(pool: PgPool) {
        let service = service(pool);

        let user = service.create_user(alice()).await.unwrap();

        assert_ne!(user.password_hash, "pass1234");
        assert!(password::verify_password("pass1234", &user.password_hash).unwrap());
        assert!(!password::verify_password("wrong", &user.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_rehashes_new_credential(pool: PgPool) {
        let service = service(pool);
        let user = service.create_user(alice()).await.unwrap();

        let updated = service
            .update_user(
                user.id,
                UserUpdate {
                    password: Some("newpass1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.password_hash, user.password_hash);
        assert_ne!(updated.password_hash, "newpass1");
        assert!(password::verify_password("newpass1", &updated.password_hash).unwrap());
        // Old credential no longer valid
        assert!(!password::verify_password("pass1234", &updated.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_without_password_keeps_stored_hash(pool: PgPool) {
        let service = service(pool);
        let user = service.create_user(alice()).await.unwrap();

        let updated = service
            .update_user(
                user.id,
                UserUpdate {
                    username: Some("alice_v2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "alice_v2");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rehash_policy_always_rewrites_same_plaintext(pool: PgPool) {
        let service = service(pool);
        let user = service.create_user(alice()).await.unwrap();

        let updated = service
            .update_user(
                user.id,
                UserUpdate {
                    password: Some("pass1234".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Fresh salt, fresh stored value, same credential still verifies
        assert_ne!(updated.password_hash, user.password_hash);
        assert!(password::verify_password("pass1234", &updated.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rehash_policy_if_changed_skips_matching_plaintext(pool: PgPool) {
        let service = UserService::new(pool, test_password_config(RehashPolicy::IfChanged));
        let user = service.create_user(alice()).await.unwrap();

        let same = service
            .update_user(
                user.id,
                UserUpdate {
                    password: Some("pass1234".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.password_hash, user.password_hash);

        let changed = service
            .update_user(
                user.id,
                UserUpdate {
                    password: Some("newpass1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_ne!(changed.password_hash, user.password_hash);
        assert!(password::verify_password("newpass1", &changed.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_two_accounts_same_password_different_hashes(pool: PgPool) {
        let service = service(pool);

        let first = service.create_user(alice()).await.unwrap();
        let second = service
            .create_user(NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "pass1234".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(first.password_hash, second.password_hash);
        assert!(password::verify_password("pass1234", &first.password_hash).unwrap());
        assert!(password::verify_password("pass1234", &second.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_short_password_rejected_before_hashing(pool: PgPool) {
        let service = service(pool.clone());

        // Length 3 fails validation
        let err = service
            .create_user(NewUser {
                password: "abc".to_string(),
                ..alice()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));

        // Nothing was written
        assert!(service.get_user_by_email("alice@example.com").await.unwrap().is_none());

        // Length 4 is accepted and hashed
        let user = service
            .create_user(NewUser {
                password: "abcd".to_string(),
                ..alice()
            })
            .await
            .unwrap();
        assert!(password::verify_password("abcd", &user.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_malformed_email_rejected(pool: PgPool) {
        let service = service(pool);

        let err = service
            .create_user(NewUser {
                email: "not-an-email".to_string(),
                ..alice()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_email_conflict(pool: PgPool) {
        let service = service(pool);

        service.create_user(alice()).await.unwrap();
        let err = service
            .create_user(NewUser {
                username: "other".to_string(),
                ..alice()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(DbError::UniqueViolation { .. })));
        assert_eq!(err.user_message(), "An account with this email address already exists");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_authenticate(pool: PgPool) {
        let service = service(pool);
        let created = service.create_user(alice()).await.unwrap();

        let user = service.authenticate("alice@example.com", "pass1234").await.unwrap();
        assert_eq!(user.id, created.id);

        let bad_password = service.authenticate("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(bad_password, Error::Unauthenticated { .. }));

        let unknown_email = service.authenticate("ghost@example.com", "pass1234").await.unwrap_err();
        assert!(matches!(unknown_email, Error::Unauthenticated { .. }));
        // Same message either way
        assert_eq!(bad_password.user_message(), unknown_email.user_message());
    }
}
