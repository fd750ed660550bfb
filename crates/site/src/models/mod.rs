//! Domain models for the site.

pub mod post;
pub mod session;
pub mod user;

pub use post::Post;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
