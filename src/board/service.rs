//! Board service.
//!
//! Post submission, password-checked deletion and page listing on top of
//! the repository and image storage.

use tracing::{debug, info, warn};

use crate::auth::{hash_password, verify_password, PasswordError};
use crate::db::Database;
use crate::file::{detect_image, ImageKind, ImageStorage};
use crate::Result;

use super::anchor::PageIndex;
use super::post::{NewPost, Post};
use super::repository::PostRepository;

/// An image attached to a submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename sent by the browser.
    pub file_name: String,
    /// Content type declared by the browser. Only logged; the format is
    /// decided from the content.
    pub content_type: Option<String>,
    /// File content.
    pub content: Vec<u8>,
}

impl ImageUpload {
    /// Image format recognised from the file content.
    pub fn detect(&self) -> Option<ImageKind> {
        detect_image(&self.content)
    }
}

/// A post submission as received from the form.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Post body.
    pub body: String,
    /// Plaintext delete password; empty means none.
    pub delete_password: String,
    /// Attached image.
    pub image: Option<ImageUpload>,
}

/// Why a submission was not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Body was empty or whitespace only.
    EmptyBody,
    /// Attached file content is not a recognised image format.
    NotAnImage,
    /// Delete password exceeds the allowed length.
    PasswordTooLong,
}

/// Outcome of a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The post was stored.
    Created(Post),
    /// Nothing was stored.
    Rejected(Rejection),
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The post was removed.
    Deleted,
    /// No post with that ID.
    NotFound,
    /// The post has no delete password.
    NotDeletable,
    /// The password didn't match.
    WrongPassword,
}

impl DeleteOutcome {
    /// Whether the post was removed.
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// One rendered page of the board.
#[derive(Debug, Clone)]
pub struct BoardPage {
    /// Requested page number (1-based).
    pub page: u32,
    /// Number of pages; 0 when the board is empty.
    pub total_pages: u32,
    /// Number of posts on the board.
    pub total_count: i64,
    /// Posts on this page, newest first.
    pub posts: Vec<Post>,
    /// Page lookup for every post, for reply anchors.
    pub index: PageIndex,
}

/// Number of pages needed for `total` posts.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 {
        return 0;
    }
    let page_size = i64::from(page_size.max(1));
    ((total + page_size - 1) / page_size) as u32
}

/// Board service.
pub struct BoardService<'a> {
    db: &'a Database,
    storage: &'a ImageStorage,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService.
    pub fn new(db: &'a Database, storage: &'a ImageStorage) -> Self {
        Self { db, storage }
    }

    /// Store a submission.
    ///
    /// An attachment whose bytes are not a recognised image rejects the
    /// whole submission before anything is written. If the insert fails the stored image is removed again.
    pub async fn submit(&self, submission: Submission) -> Result<SubmitOutcome> {
        if submission.body.trim().is_empty() {
            debug!("Rejected submission with empty body");
            return Ok(SubmitOutcome::Rejected(Rejection::EmptyBody));
        }

        let image = match submission.image {
            Some(image) => match image.detect() {
                Some(kind) => Some((image.content, kind)),
                None => {
                    info!(
                        declared = image.content_type.as_deref().unwrap_or("-"),
                        file_name = %image.file_name,
                        "Rejected non-image upload"
                    );
                    return Ok(SubmitOutcome::Rejected(Rejection::NotAnImage));
                }
            },
            None => None,
        };

        let password_hash = if submission.delete_password.is_empty() {
            None
        } else {
            match hash_password(&submission.delete_password) {
                Ok(hash) => Some(hash),
                Err(PasswordError::TooLong) => {
                    return Ok(SubmitOutcome::Rejected(Rejection::PasswordTooLong));
                }
                Err(e) => return Err(e.into()),
            }
        };

        let stored_name = match &image {
            Some((content, kind)) => Some(self.storage.save(content, kind.extension)?),
            None => None,
        };

        let new_post = NewPost {
            body: submission.body,
            image_filename: stored_name.clone(),
            delete_password: password_hash,
        };

        let repo = PostRepository::new(self.db.pool());
        match repo.create(&new_post).await {
            Ok(post) => {
                info!(
                    post_id = post.id,
                    has_image = post.has_image(),
                    deletable = post.is_deletable(),
                    "Post created"
                );
                Ok(SubmitOutcome::Created(post))
            }
            Err(e) => {
                if let Some(name) = stored_name {
                    if let Err(cleanup) = self.storage.delete(&name) {
                        warn!(error = %cleanup, stored_name = %name, "Failed to remove orphaned image");
                    }
                }
                Err(e)
            }
        }
    }

    /// Delete a post if the password verifies against its stored hash.
    ///
    /// The post's image is removed along with the row.
    pub async fn delete(&self, post_id: i64, password: &str) -> Result<DeleteOutcome> {
        let repo = PostRepository::new(self.db.pool());

        let Some(post) = repo.get_by_id(post_id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };
        let Some(hash) = post.delete_password.as_deref() else {
            return Ok(DeleteOutcome::NotDeletable);
        };

        match verify_password(password, hash) {
            Ok(()) => {}
            Err(PasswordError::VerificationFailed) => {
                info!(post_id, "Delete rejected: wrong password");
                return Ok(DeleteOutcome::WrongPassword);
            }
            Err(e) => {
                warn!(post_id, error = %e, "Stored delete password is unusable");
                return Ok(DeleteOutcome::WrongPassword);
            }
        }

        if !repo.delete(post_id).await? {
            return Ok(DeleteOutcome::NotFound);
        }

        if let Some(name) = &post.image_filename {
            if let Err(e) = self.storage.delete(name) {
                warn!(post_id, error = %e, "Failed to remove image of deleted post");
            }
        }

        info!(post_id, "Post deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Load one page of posts together with the page index.
    ///
    /// Pages past the end yield an empty post list.
    pub async fn list_page(&self, page: u32, page_size: u32) -> Result<BoardPage> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let repo = PostRepository::new(self.db.pool());

        let offset = i64::from(page - 1) * i64::from(page_size);
        let posts = repo.list_paginated(offset, i64::from(page_size)).await?;
        let total_count = repo.count().await?;
        let ids = repo.list_ids().await?;

        Ok(BoardPage {
            page,
            total_pages: total_pages(total_count, page_size),
            total_count,
            posts,
            index: PageIndex::build(&ids, page_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        db: Database,
        storage: ImageStorage,
    }

    impl Fixture {
        async fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let storage = ImageStorage::new(temp_dir.path().join("image")).unwrap();
            let db = Database::open_in_memory().await.unwrap();
            Self {
                _temp_dir: temp_dir,
                db,
                storage,
            }
        }

        fn service(&self) -> BoardService<'_> {
            BoardService::new(&self.db, &self.storage)
        }
    }

    fn text(body: &str) -> Submission {
        Submission {
            body: body.to_string(),
            ..Default::default()
        }
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            content: b"\x89PNG\r\n\x1a\n".to_vec(),
        }
    }

    fn created(outcome: SubmitOutcome) -> Post {
        match outcome {
            SubmitOutcome::Created(post) => post,
            SubmitOutcome::Rejected(r) => panic!("unexpected rejection: {r:?}"),
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[tokio::test]
    async fn test_submit_text_only() {
        let fx = Fixture::new().await;

        let post = created(fx.service().submit(text("hello")).await.unwrap());

        assert_eq!(post.body, "hello");
        assert!(post.image_filename.is_none());
        assert!(post.delete_password.is_none());
    }

    #[tokio::test]
    async fn test_submit_hashes_password() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "locked".to_string(),
            delete_password: "pw".to_string(),
            image: None,
        };

        let post = created(fx.service().submit(submission).await.unwrap());

        let hash = post.delete_password.unwrap();
        assert_ne!(hash, "pw");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_submit_empty_body_rejected() {
        let fx = Fixture::new().await;

        let outcome = fx.service().submit(text("  \n ")).await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(Rejection::EmptyBody)
        ));
        let repo = PostRepository::new(fx.db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_with_image() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "pic".to_string(),
            image: Some(png("cat.png")),
            ..Default::default()
        };

        let post = created(fx.service().submit(submission).await.unwrap());

        let name = post.image_filename.unwrap();
        assert!(name.ends_with(".png"));
        assert!(fx.storage.exists(&name));
    }

    #[tokio::test]
    async fn test_submit_non_image_rejected() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "not a picture".to_string(),
            image: Some(ImageUpload {
                file_name: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                content: b"plain text".to_vec(),
            }),
            ..Default::default()
        };

        let outcome = fx.service().submit(submission).await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(Rejection::NotAnImage)
        ));
        let repo = PostRepository::new(fx.db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(fx.storage.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_html_declared_as_png_rejected() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "looks like a picture".to_string(),
            image: Some(ImageUpload {
                file_name: "evil.html".to_string(),
                content_type: Some("image/png".to_string()),
                content: b"<script>alert(document.cookie)</script>".to_vec(),
            }),
            ..Default::default()
        };

        let outcome = fx.service().submit(submission).await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(Rejection::NotAnImage)
        ));
        let repo = PostRepository::new(fx.db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(fx.storage.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stored_extension_follows_content() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "renamed".to_string(),
            image: Some(ImageUpload {
                file_name: "photo.html".to_string(),
                content_type: None,
                content: b"\x89PNG\r\n\x1a\n".to_vec(),
            }),
            ..Default::default()
        };

        let post = created(fx.service().submit(submission).await.unwrap());

        let name = post.image_filename.unwrap();
        assert!(name.ends_with(".png"));
        assert!(fx.storage.exists(&name));
    }

    #[tokio::test]
    async fn test_submit_password_too_long_rejected() {
        let fx = Fixture::new().await;
        let submission = Submission {
            body: "body".to_string(),
            delete_password: "x".repeat(crate::auth::MAX_PASSWORD_LENGTH + 1),
            image: None,
        };

        let outcome = fx.service().submit(submission).await.unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(Rejection::PasswordTooLong)
        ));
    }

    #[tokio::test]
    async fn test_delete_with_correct_password() {
        let fx = Fixture::new().await;
        let service = fx.service();
        let keep = created(service.submit(text("keep")).await.unwrap());
        let target = created(
            service
                .submit(Submission {
                    body: "target".to_string(),
                    delete_password: "pw".to_string(),
                    image: Some(png("a.png")),
                })
                .await
                .unwrap(),
        );
        let image = target.image_filename.clone().unwrap();

        let outcome = service.delete(target.id, "pw").await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        let repo = PostRepository::new(fx.db.pool());
        assert!(repo.get_by_id(target.id).await.unwrap().is_none());
        assert!(repo.get_by_id(keep.id).await.unwrap().is_some());
        assert!(!fx.storage.exists(&image));
    }

    #[tokio::test]
    async fn test_delete_with_wrong_password() {
        let fx = Fixture::new().await;
        let service = fx.service();
        let target = created(
            service
                .submit(Submission {
                    body: "target".to_string(),
                    delete_password: "pw".to_string(),
                    image: None,
                })
                .await
                .unwrap(),
        );

        assert_eq!(
            service.delete(target.id, "nope").await.unwrap(),
            DeleteOutcome::WrongPassword
        );
        assert_eq!(
            service.delete(target.id, "").await.unwrap(),
            DeleteOutcome::WrongPassword
        );
        let repo = PostRepository::new(fx.db.pool());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_stored_password() {
        let fx = Fixture::new().await;
        let service = fx.service();
        let post = created(service.submit(text("open")).await.unwrap());

        assert_eq!(
            service.delete(post.id, "").await.unwrap(),
            DeleteOutcome::NotDeletable
        );
        assert_eq!(
            service.delete(post.id, "anything").await.unwrap(),
            DeleteOutcome::NotDeletable
        );
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let fx = Fixture::new().await;
        assert_eq!(
            fx.service().delete(404, "pw").await.unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_list_page() {
        let fx = Fixture::new().await;
        let service = fx.service();
        for i in 1..=25 {
            service.submit(text(&format!("post {i}"))).await.unwrap();
        }

        let page = service.list_page(3, 10).await.unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 25);
        let bodies: Vec<_> = page.posts.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, ["post 5", "post 4", "post 3", "post 2", "post 1"]);
        assert_eq!(page.index.len(), 25);
        assert_eq!(page.index.page_of(page.posts[0].id), Some(3));
    }

    #[tokio::test]
    async fn test_list_page_clamps_and_overflows() {
        let fx = Fixture::new().await;
        let service = fx.service();
        service.submit(text("only")).await.unwrap();

        let page = service.list_page(0, 10).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.posts.len(), 1);

        let beyond = service.list_page(5, 10).await.unwrap();
        assert_eq!(beyond.total_pages, 1);
        assert!(beyond.posts.is_empty());
    }

    #[tokio::test]
    async fn test_list_page_empty_board() {
        let fx = Fixture::new().await;
        let page = fx.service().list_page(1, 10).await.unwrap();
        assert_eq!(page.total_pages, 0);
        assert!(page.posts.is_empty());
        assert!(page.index.is_empty());
    }
}
