//! Authentication service.
//!
//! Registration and password login against the local users table.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use inkcap_core::{Email, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Authentication service.
///
/// Handles user registration and credential verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account with a display name, email, and password.
    ///
    /// The password is hashed with Argon2id using a fresh random salt per
    /// call, so two registrations with identical passwords produce
    /// different stored hashes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` / `AuthError::InvalidUsername` if
    /// the inputs fail validation.
    /// Returns `AuthError::WeakPassword` if the password is empty.
    /// Returns `AuthError::EmailTaken` / `AuthError::NameTaken` if the
    /// email or name is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = Username::parse(name)?;
        let email = Email::parse(email)?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(msg) if msg.contains("email") => AuthError::EmailTaken,
                RepositoryError::Conflict(_) => AuthError::NameTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Verify an email/password pair and return the matching account.
    ///
    /// An unknown email and a wrong password both yield
    /// `AuthError::InvalidCredentials`; the missing-account case is handled
    /// explicitly before any hash comparison, so there is no user object to
    /// dereference when the lookup misses.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Look up an account by email, for the registration courtesy check.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let Ok(email) = Email::parse(email) else {
            // A malformed email can't match an account.
            return Ok(None);
        };
        let user = self.users.get_by_email(&email).await?;
        Ok(user)
    }
}

/// Validate password meets requirements.
///
/// There is no minimum length; a value like "pw1" is accepted. Only a
/// missing password is rejected.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::WeakPassword(
            "password cannot be empty".to_owned(),
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id with a per-call random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// The underlying comparison is constant-time.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_salts_per_call() {
        let a = hash_password("hunter2hunter2").expect("hash");
        let b = hash_password("hunter2hunter2").expect("hash");
        assert_ne!(a, b, "two hashes of the same password must differ");
    }

    #[test]
    fn verify_accepts_matching_password() {
        let hash = hash_password("correct horse battery").expect("hash");
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery").expect("hash");
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn empty_password_rejected() {
        assert!(matches!(
            validate_password(""),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn short_password_accepted() {
        assert!(validate_password("pw1").is_ok());
    }
}
