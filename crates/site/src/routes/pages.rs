//! Static informational page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::CurrentUser;
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

/// Display the About page.
#[instrument(skip(state, user))]
pub async fn about(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> AboutTemplate {
    let is_admin = state.is_admin(user.as_ref());
    AboutTemplate {
        current_user: user,
        is_admin,
    }
}

/// Display the Contact page.
#[instrument(skip(state, user))]
pub async fn contact(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> ContactTemplate {
    let is_admin = state.is_admin(user.as_ref());
    ContactTemplate {
        current_user: user,
        is_admin,
    }
}
