//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Post list (home page)
//! GET  /health              - Health check
//!
//! # Posts
//! GET  /show-post/{id}      - Single post view
//! GET  /new-post            - Blank post form (admin only)
//! POST /new-post            - Create post (admin only)
//! GET  /edit-post/{id}      - Pre-filled edit form (admin only)
//! POST /edit-post/{id}      - Apply edit (admin only)
//! POST /delete-post/{id}    - Delete post (admin only; never exposed on GET)
//!
//! # Auth
//! GET  /register            - Registration page
//! POST /register            - Create account, establish session
//! GET  /login               - Login page
//! POST /login               - Verify credentials, establish session
//! GET  /logout              - Clear session
//!
//! # Pages
//! GET  /about               - About page
//! GET  /contact             - Contact page
//! ```

pub mod auth;
pub mod home;
pub mod pages;
pub mod posts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the post routes router.
///
/// The mutating routes authorize through the `RequireAdmin` extractor;
/// a request never reaches a handler body without the admin identity.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/show-post/{id}", get(posts::show))
        .route("/new-post", get(posts::new_form).post(posts::create))
        .route("/edit-post/{id}", get(posts::edit_form).post(posts::update))
        .route("/delete-post/{id}", post(posts::delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(post_routes())
        .merge(auth_routes())
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
}
