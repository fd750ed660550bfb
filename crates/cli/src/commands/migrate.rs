//! Database migration command.
//!
//! Applies the embedded site migrations to the database named by
//! `SITE_DATABASE_URL` (or `DATABASE_URL`). Safe to run repeatedly;
//! already-applied migrations are skipped.

use super::CommandError;

/// Run site database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running site migrations...");
    inkcap_site::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Site migrations complete");
    Ok(())
}
