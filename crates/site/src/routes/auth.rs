//! Authentication route handlers.
//!
//! Registration, login, and logout against the local credential store.
//! Feedback travels as short codes in query parameters and is translated
//! to messages when the page renders.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/notice display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Translate an error code from the query string into a message.
///
/// Only known codes produce a message; arbitrary query text is never
/// echoed back into the page.
fn error_message(code: &str) -> Option<String> {
    let message = match code {
        "credentials" => "Invalid email or password, please try again.",
        "name_taken" => "That name is already taken, please pick another.",
        "password" => "Password cannot be empty.",
        "invalid" => "Please enter a valid name and email address.",
        "session" => "Something went wrong with your session, please try again.",
        _ => return None,
    };
    Some(message.to_owned())
}

/// Translate a notice code from the query string into a message.
fn notice_message(code: &str) -> Option<String> {
    match code {
        "registered" => {
            Some("You've already signed up with that email, log in instead!".to_owned())
        }
        _ => None,
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> RegisterTemplate {
    let is_admin = state.is_admin(user.as_ref());
    RegisterTemplate {
        error: query.error.as_deref().and_then(error_message),
        current_user: user,
        is_admin,
    }
}

/// Handle registration form submission.
///
/// On success the new account is logged in immediately and sent home.
/// An already-registered email redirects to the login page with a notice,
/// matching the friendly path; the unique index on email remains the
/// integrity boundary if two registrations race.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    // Courtesy check so the visitor gets a login prompt instead of an error.
    match auth.find_by_email(&form.email).await {
        Ok(Some(_)) => return Redirect::to("/login?notice=registered").into_response(),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Registration lookup failed: {e}");
            return Redirect::to("/register?error=session").into_response();
        }
    }

    match auth.register(&form.name, &form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                name: user.name,
                email: user.email,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session after registration: {e}");
                return Redirect::to("/login?error=session").into_response();
            }
            tracing::info!(user_id = %current.id, "Account registered");
            Redirect::to("/").into_response()
        }
        // Lost a race with a concurrent registration for the same email.
        Err(AuthError::EmailTaken) => Redirect::to("/login?notice=registered").into_response(),
        Err(AuthError::NameTaken) => Redirect::to("/register?error=name_taken").into_response(),
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password").into_response()
        }
        Err(AuthError::InvalidEmail(_) | AuthError::InvalidUsername(_)) => {
            Redirect::to("/register?error=invalid").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Redirect::to("/register?error=session").into_response()
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    let is_admin = state.is_admin(user.as_ref());
    LoginTemplate {
        error: query.error.as_deref().and_then(error_message),
        notice: query.notice.as_deref().and_then(notice_message),
        current_user: user,
        is_admin,
    }
}

/// Handle login form submission.
///
/// An unknown email and a wrong password produce the same message; neither
/// can crash the handler because the missing-account case is an explicit
/// `AuthError`, not a null dereference.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .verify(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                name: user.name,
                email: user.email,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("Failed to set session after login: {e}");
                return Redirect::to("/login?error=session").into_response();
            }
            tracing::info!(user_id = %current.id, "Login succeeded");
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials | AuthError::InvalidEmail(_)) => {
            tracing::warn!("Login failed: bad credentials");
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/login?error=session").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the identity and destroys the whole session; subsequent requests
/// resolve to an anonymous visitor until the next login.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_translate() {
        assert!(error_message("credentials").is_some());
        assert!(error_message("password").is_some());
        assert!(notice_message("registered").is_some());
    }

    #[test]
    fn unknown_codes_produce_no_message() {
        assert!(error_message("free coffee at evil.example").is_none());
        assert!(notice_message("click here").is_none());
    }
}
