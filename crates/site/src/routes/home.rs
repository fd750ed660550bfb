//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::PostRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{CurrentUser, Post};
use crate::state::AppState;

/// Home page template: all posts, newest last (insertion order).
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub posts: Vec<Post>,
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

/// Display the home page with all posts.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<HomeTemplate> {
    let posts = PostRepository::new(state.pool()).list_all().await?;
    let is_admin = state.is_admin(user.as_ref());

    Ok(HomeTemplate {
        posts,
        current_user: user,
        is_admin,
    })
}
