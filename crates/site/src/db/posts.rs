//! Post repository for database operations.
//!
//! Posts carry a foreign key to their author; the author's display name is
//! joined in explicitly rather than hydrated through an object graph.

use sqlx::SqlitePool;

use inkcap_core::{PostId, UserId};

use super::RepositoryError;
use crate::models::post::{Post, PostDraft};

/// Format string for the human-readable publication date, e.g.
/// "August 30, 2026". Captured once at creation and never updated.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Database row for a post joined with its author's name.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    author_name: String,
    title: String,
    subtitle: String,
    date: String,
    body: String,
    img_url: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Self {
            id: PostId::new(r.id),
            author_id: UserId::new(r.author_id),
            author_name: r.author_name,
            title: r.title,
            subtitle: r.subtitle,
            date: r.date,
            body: r.body,
            img_url: r.img_url,
        }
    }
}

const SELECT_POST: &str = r"
    SELECT p.id, p.author_id, u.name AS author_name,
           p.title, p.subtitle, p.date, p.body, p.img_url
    FROM posts p
    JOIN users u ON u.id = p.author_id
";

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all posts in insertion order.
    ///
    /// The order is id ASC; callers wanting chronological ordering must
    /// sort explicitly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} ORDER BY p.id ASC"))
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Get a post by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE p.id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Post::from))
    }

    /// Create a new post owned by `author_id`.
    ///
    /// The publication date is captured from the server clock at this
    /// moment and stored as a fixed display string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the title already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        author_id: UserId,
        draft: &PostDraft,
    ) -> Result<Post, RepositoryError> {
        let date = chrono::Utc::now().format(DATE_FORMAT).to_string();

        let inserted: (i64,) = sqlx::query_as(
            r"
            INSERT INTO posts (author_id, title, subtitle, date, body, img_url)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(author_id.as_i64())
        .bind(&draft.title)
        .bind(&draft.subtitle)
        .bind(&date)
        .bind(&draft.body)
        .bind(&draft.img_url)
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_violation)?;

        self.get(PostId::new(inserted.0))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update the editable fields of a post in place.
    ///
    /// The stored date is never touched by an edit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new title collides with
    /// another post.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = ?, subtitle = ?, body = ?, img_url = ?
            WHERE id = ?
            ",
        )
        .bind(&draft.title)
        .bind(&draft.subtitle)
        .bind(&draft.body)
        .bind(&draft.img_url)
        .bind(id.as_i64())
        .execute(self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a post permanently.
    ///
    /// # Returns
    ///
    /// Returns `true` if the post was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: PostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all posts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}

/// Map a `SQLite` unique-constraint violation on the title to `Conflict`.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("title already exists".to_owned());
    }
    RepositoryError::Database(e)
}
