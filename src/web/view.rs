//! HTML view of the board page.

use askama::Template;

use crate::board::{render_body, BoardPage, Post};
use crate::datetime::format_post_time;

/// One link in the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Page number.
    pub number: u32,
    /// Whether this is the page being shown.
    pub current: bool,
}

/// A post prepared for display.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: i64,
    pub created_at: String,
    /// Escaped body with reply links; rendered unescaped.
    pub body_html: String,
    /// Stored image name, served under `/image/`.
    pub image_filename: Option<String>,
    pub deletable: bool,
}

impl PostView {
    fn from_post(post: &Post, page: &BoardPage, timezone: &str) -> Self {
        Self {
            id: post.id,
            created_at: format_post_time(&post.created_at, timezone),
            body_html: render_body(&post.body, &page.index),
            image_filename: post.image_filename.clone(),
            deletable: post.is_deletable(),
        }
    }
}

/// The board page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub pages: Vec<PageLink>,
    pub posts: Vec<PostView>,
    /// Show the wrong-password alert.
    pub delete_failed: bool,
}

impl BoardTemplate {
    /// Build the view for a loaded page.
    pub fn new(title: &str, page: &BoardPage, timezone: &str, delete_failed: bool) -> Self {
        Self {
            title: title.to_string(),
            pages: (1..=page.total_pages)
                .map(|number| PageLink {
                    number,
                    current: number == page.page,
                })
                .collect(),
            posts: page
                .posts
                .iter()
                .map(|post| PostView::from_post(post, page, timezone))
                .collect(),
            delete_failed,
        }
    }
}
