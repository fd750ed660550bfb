//! Post CRUD route handlers.
//!
//! The read routes are public; create, edit, and delete require the
//! configured admin account via the `RequireAdmin` extractor. Deletion is
//! only reachable over POST.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use inkcap_core::PostId;

use crate::db::{PostRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalUser, RequireAdmin};
use crate::models::post::PostDraft;
use crate::models::{CurrentUser, Post};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Post form data, shared by the new and edit forms.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    /// Trim surrounding whitespace and convert into a draft.
    fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title.trim().to_owned(),
            subtitle: self.subtitle.trim().to_owned(),
            body: self.body,
            img_url: self.img_url.trim().to_owned(),
        }
    }
}

/// Check that every field of the draft is present. All post fields are
/// required non-empty strings.
fn validate(draft: &PostDraft) -> Option<&'static str> {
    let missing = draft.title.is_empty()
        || draft.subtitle.is_empty()
        || draft.body.trim().is_empty()
        || draft.img_url.is_empty();

    missing.then_some("All fields are required.")
}

// =============================================================================
// Templates
// =============================================================================

/// Single post view template.
#[derive(Template, WebTemplate)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub post: Post,
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

/// Shared new/edit post form template.
#[derive(Template, WebTemplate)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    /// `Some(id)` when editing an existing post, `None` when creating.
    pub edit_id: Option<PostId>,
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
    pub is_admin: bool,
}

impl PostFormTemplate {
    /// Blank form for creating a post.
    fn blank(admin: CurrentUser) -> Self {
        Self {
            edit_id: None,
            title: String::new(),
            subtitle: String::new(),
            img_url: String::new(),
            body: String::new(),
            error: None,
            current_user: Some(admin),
            is_admin: true,
        }
    }

    /// Form pre-filled from an existing post.
    fn prefilled(post: &Post, admin: CurrentUser) -> Self {
        Self {
            edit_id: Some(post.id),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
            error: None,
            current_user: Some(admin),
            is_admin: true,
        }
    }

    /// Re-render the submitted values with an error message.
    fn rejected(edit_id: Option<PostId>, draft: &PostDraft, error: String, admin: CurrentUser) -> Self {
        Self {
            edit_id,
            title: draft.title.clone(),
            subtitle: draft.subtitle.clone(),
            img_url: draft.img_url.clone(),
            body: draft.body.clone(),
            error: Some(error),
            current_user: Some(admin),
            is_admin: true,
        }
    }
}

// =============================================================================
// Read Routes
// =============================================================================

/// Display a single post.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist; a missing row is checked before
/// any field of the post is touched.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<i64>,
) -> Result<PostTemplate> {
    let post = PostRepository::new(state.pool())
        .get(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    let is_admin = state.is_admin(user.as_ref());

    Ok(PostTemplate {
        post,
        current_user: user,
        is_admin,
    })
}

// =============================================================================
// Admin Routes
// =============================================================================

/// Display the blank new-post form.
#[instrument(skip_all)]
pub async fn new_form(RequireAdmin(admin): RequireAdmin) -> PostFormTemplate {
    PostFormTemplate::blank(admin)
}

/// Handle new-post form submission.
///
/// On success redirects home; a duplicate title re-renders the form with a
/// field-level error instead of surfacing a storage failure.
#[instrument(skip(state, admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let draft = form.into_draft();
    if let Some(message) = validate(&draft) {
        return Ok(
            PostFormTemplate::rejected(None, &draft, message.to_owned(), admin).into_response(),
        );
    }

    match PostRepository::new(state.pool()).create(admin.id, &draft).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, title = %post.title, "Post created");
            Ok(Redirect::to("/").into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(PostFormTemplate::rejected(
            None,
            &draft,
            "A post with this title already exists.".to_owned(),
            admin,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Display the edit form pre-filled from the existing post.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist.
#[instrument(skip(state, admin))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<PostFormTemplate> {
    let post = PostRepository::new(state.pool())
        .get(PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    Ok(PostFormTemplate::prefilled(&post, admin))
}

/// Handle edit form submission.
///
/// Overwrites title, subtitle, image URL, and body; the stored publication
/// date is left untouched. Redirects to the post view on success.
#[instrument(skip(state, admin, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let post_id = PostId::new(id);

    let draft = form.into_draft();
    if let Some(message) = validate(&draft) {
        return Ok(PostFormTemplate::rejected(
            Some(post_id),
            &draft,
            message.to_owned(),
            admin,
        )
        .into_response());
    }

    match PostRepository::new(state.pool()).update(post_id, &draft).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "Post updated");
            Ok(Redirect::to(&format!("/show-post/{id}")).into_response())
        }
        Err(RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("post {id}")))
        }
        Err(RepositoryError::Conflict(_)) => Ok(PostFormTemplate::rejected(
            Some(post_id),
            &draft,
            "A post with this title already exists.".to_owned(),
            admin,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Handle post deletion.
///
/// Deletion is immediate and irreversible; there is no soft delete.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let deleted = PostRepository::new(state.pool())
        .delete(PostId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("post {id}")));
    }

    tracing::info!(post_id = id, "Post deleted");
    Ok(Redirect::to("/"))
}
