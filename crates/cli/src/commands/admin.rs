//! Admin account creation command.
//!
//! The site treats the account whose id matches `SITE_ADMIN_USER_ID`
//! (default 1) as the admin, so this should be the first account created
//! on a fresh database.

use inkcap_site::db::UserRepository;
use inkcap_site::services::auth::AuthService;

use super::CommandError;

/// Create the admin account.
///
/// # Errors
///
/// Returns `CommandError` if the inputs fail validation or the name/email
/// is already registered.
pub async fn create(name: &str, email: &str, password: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    inkcap_site::db::MIGRATOR.run(&pool).await?;

    let existing = UserRepository::new(&pool).count().await?;
    if existing > 0 {
        tracing::warn!(
            existing,
            "accounts already exist; the new account will not get id 1"
        );
    }

    let user = AuthService::new(&pool).register(name, email, password).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin account created");
    Ok(())
}
