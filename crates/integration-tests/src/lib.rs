//! Integration tests for Inkcap.
//!
//! The whole application is exercised in-process: each test builds the real
//! router (handlers, session layer, extractors) over a private in-memory
//! `SQLite` database and drives it with `tower::ServiceExt::oneshot`. No
//! running server is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p inkcap-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `site_auth` - Registration, login, logout
//! - `site_posts` - Post CRUD lifecycle
//! - `site_authz` - Admin gating of mutating routes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use inkcap_core::UserId;
use inkcap_site::config::SiteConfig;
use inkcap_site::state::AppState;
use inkcap_site::{db, middleware, routes};

/// An application instance backed by a fresh in-memory database.
pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Build the full application over a private in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database or session store cannot be set up.
    pub async fn new() -> Self {
        // A single connection keeps the in-memory database alive and shared.
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .expect("valid sqlite url");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("connect to in-memory sqlite");

        db::MIGRATOR.run(&pool).await.expect("run migrations");

        let state = AppState::new(test_config(), pool.clone());
        let session_layer = middleware::create_session_layer(state.pool(), state.config())
            .await
            .expect("create session layer");

        let router = Router::new()
            .merge(routes::routes())
            .layer(session_layer)
            .with_state(state);

        Self { router, pool }
    }

    /// A new client with its own empty cookie jar.
    #[must_use]
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

/// One browser-like caller: carries the session cookie between requests.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to produce a response.
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let request = self
            .request(path)
            .body(Body::empty())
            .expect("build request");
        self.send(request).await
    }

    /// Send a POST request with a form-encoded body.
    ///
    /// # Panics
    ///
    /// Panics if the form cannot be encoded or the router fails.
    pub async fn post_form<T: Serialize>(&mut self, path: &str, form: &T) -> Response<Body> {
        let body = serde_urlencoded::to_string(form).expect("encode form");
        let request = self
            .request(path)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("build request");
        self.send(request).await
    }

    /// Register an account, establishing a session on success.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/register",
            &[("name", name), ("email", email), ("password", password)],
        )
        .await
    }

    /// Log in with an email/password pair.
    pub async fn login(&mut self, email: &str, password: &str) -> Response<Body> {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    fn request(&self, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        // Keep the session cookie like a browser would.
        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Ok(value) = value.to_str()
                && value.starts_with(middleware::SESSION_COOKIE_NAME)
                && let Some(pair) = value.split(';').next()
            {
                self.cookie = Some(pair.to_owned());
            }
        }

        response
    }
}

/// Read the full response body as a UTF-8 string.
///
/// # Panics
///
/// Panics if the body cannot be collected or is not valid UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing or not valid UTF-8.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("utf-8 location")
}

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
