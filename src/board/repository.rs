//! Post repository.
//!
//! Display order everywhere is `created_at DESC, id DESC`; the id breaks
//! ties between posts created within the same second.

use super::post::{NewPost, Post};
use crate::db::DbPool;
use crate::{BbsError, Result};

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a post and return it with its assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query(
            "INSERT INTO posts (body, image_filename, delete_password) VALUES (?, ?, ?)",
        )
        .bind(&new_post.body)
        .bind(&new_post.image_filename)
        .bind(&new_post.delete_password)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BbsError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, body, image_filename, delete_password, created_at
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Delete a post by ID.
    ///
    /// Returns true if a post was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one page of posts, newest first.
    pub async fn list_paginated(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, body, image_filename, delete_password, created_at
             FROM posts ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// List every post ID in display order.
    pub async fn list_ids(&self) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
