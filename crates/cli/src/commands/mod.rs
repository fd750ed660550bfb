//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

/// Errors shared by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] inkcap_site::db::RepositoryError),

    #[error("auth error: {0}")]
    Auth(#[from] inkcap_site::services::auth::AuthError),
}

/// Connect to the site database using `SITE_DATABASE_URL` or `DATABASE_URL`.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    let url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))?;

    let pool = inkcap_site::db::create_pool(&SecretString::from(url)).await?;
    Ok(pool)
}
