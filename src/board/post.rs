//! Post model.

/// A bulletin-board entry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post body as written by the author.
    pub body: String,
    /// Stored image name under the upload directory, if any.
    pub image_filename: Option<String>,
    /// Argon2 hash of the delete password, if any.
    pub delete_password: Option<String>,
    /// Creation timestamp (UTC, SQLite format).
    pub created_at: String,
}

impl Post {
    /// Whether the post can be deleted through the delete form.
    pub fn is_deletable(&self) -> bool {
        self.delete_password.is_some()
    }

    /// Whether the post has an attached image.
    pub fn has_image(&self) -> bool {
        self.image_filename.is_some()
    }
}

/// Data for inserting a post.
///
/// `delete_password` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post body.
    pub body: String,
    /// Stored image name.
    pub image_filename: Option<String>,
    /// Hashed delete password.
    pub delete_password: Option<String>,
}

impl NewPost {
    /// Create a text-only post without a delete password.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            image_filename: None,
            delete_password: None,
        }
    }

    /// Attach a stored image.
    pub fn with_image(mut self, stored_name: impl Into<String>) -> Self {
        self.image_filename = Some(stored_name.into());
        self
    }

    /// Set the hashed delete password.
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.delete_password = Some(hash.into());
        self
    }
}
