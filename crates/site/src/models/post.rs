//! Post domain types.

use inkcap_core::{PostId, UserId};

/// A published blog post (domain type).
///
/// The display date is captured once at creation as a human-readable string
/// (e.g., "August 30, 2026") and never changes on edit. The author's display
/// name is joined from `users` at the store layer; there is no bidirectional
/// object graph.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// Account that created the post.
    pub author_id: UserId,
    /// Author display name, joined from the users table.
    pub author_name: String,
    /// Post title, unique across all posts.
    pub title: String,
    /// Subtitle shown under the title.
    pub subtitle: String,
    /// Human-readable publication date, fixed at creation.
    pub date: String,
    /// Post body (rendered HTML from the editor).
    pub body: String,
    /// Header image URL.
    pub img_url: String,
}

/// Editable post fields, shared by the create and edit forms.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}
