//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use inkcap_core::{Email, UserId, Username};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; it only exists
/// inside the credential verification path.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, unique per account.
    pub name: Username,
    /// Email address, the login key.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
