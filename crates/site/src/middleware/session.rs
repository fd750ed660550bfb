//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions, with cookies
//! signed by the configured session secret.

use cookie::Key;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "inkcap_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with a `SQLite` store.
///
/// Runs the store's own migration to create its session table. The signing
/// key is expanded from the configured secret, which config validation
/// guarantees holds at least 32 bytes of material.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_layer(
    pool: &SqlitePool,
    config: &SiteConfig,
) -> Result<SessionManagerLayer<SqliteStore, SignedCookie>, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::SecretString;
    use sqlx::sqlite::SqlitePoolOptions;

    use inkcap_core::UserId;

    fn test_config() -> SiteConfig {
        SiteConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost".to_owned(),
            session_secret: SecretString::from("k9Qz#mP2vL8xW4rTj6Ns!bD3fG7hJ1cV"),
            admin_user_id: UserId::new(1),
            static_dir: std::path::PathBuf::from("crates/site/static"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[tokio::test]
    async fn layer_builds_with_signed_key() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");

        assert!(create_session_layer(&pool, &test_config()).await.is_ok());
    }
}
