//! Database seeding command.
//!
//! Inserts a few sample posts so a fresh install has content to render.
//! Posts whose titles already exist are skipped, so the command can be
//! run more than once.

use inkcap_core::UserId;
use inkcap_site::db::{PostRepository, RepositoryError, UserRepository};
use inkcap_site::models::post::PostDraft;

use super::CommandError;

const SAMPLE_POSTS: &[(&str, &str, &str)] = &[
    (
        "The Life of Cactus",
        "Who knew that cacti lived such interesting lives.",
        "<p>Cacti are adapted to extremely arid environments, yet a single \
         saguaro can live for over 150 years and host entire ecosystems \
         inside its ribs.</p>",
    ),
    (
        "Top 15 Things to do When You are Bored",
        "Are you bored? Don't know what to do? Try these top 15 activities.",
        "<p>Number one: start a blog. The rest follow naturally from \
         there.</p>",
    ),
    (
        "Introduction to Intermediate Jazz",
        "Stop worrying about what key you are in.",
        "<p>Once the scales are under your fingers, the interesting part \
         begins: leaving them out.</p>",
    ),
];

/// Seed the database with sample posts.
///
/// # Errors
///
/// Returns `CommandError` if the author account does not exist or an
/// insert fails for a reason other than a duplicate title.
pub async fn run(author_id: i64) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    inkcap_site::db::MIGRATOR.run(&pool).await?;

    let author_id = UserId::new(author_id);
    let Some(author) = UserRepository::new(&pool).get_by_id(author_id).await? else {
        return Err(CommandError::Repository(RepositoryError::NotFound));
    };

    let posts = PostRepository::new(&pool);
    let mut created = 0usize;

    for (title, subtitle, body) in SAMPLE_POSTS {
        let draft = PostDraft {
            title: (*title).to_owned(),
            subtitle: (*subtitle).to_owned(),
            body: (*body).to_owned(),
            img_url: "https://images.unsplash.com/photo-1509114397022-ed747cca3f65".to_owned(),
        };

        match posts.create(author.id, &draft).await {
            Ok(post) => {
                created += 1;
                tracing::info!(post_id = %post.id, title = %post.title, "Seeded post");
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(title, "Post already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(created, "Seeding complete");
    Ok(())
}
