//! Bulletin board: posts, listing and reply anchors.

pub mod anchor;
mod post;
mod repository;
mod service;

pub use anchor::{render_body, PageIndex};
pub use post::{NewPost, Post};
pub use repository::PostRepository;
pub use service::{
    total_pages, BoardPage, BoardService, DeleteOutcome, ImageUpload, Rejection, Submission,
    SubmitOutcome,
};
