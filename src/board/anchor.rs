//! Reply anchors (`>>N`) and the post ID → page lookup behind them.
//!
//! Anchors may point at posts on other pages, so linking needs the page
//! number of every post, not only of the ones being rendered.

use std::collections::HashMap;
use std::sync::OnceLock;

use askama_escape::{escape, Html};
use regex::{Captures, Regex};

/// Matches an anchor after HTML escaping.
fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(r"&gt;&gt;(\d+)").expect("anchor pattern is valid"))
}

/// Map from post ID to the page it is shown on.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    pages: HashMap<i64, u32>,
}

impl PageIndex {
    /// Build the index from all post IDs in display order.
    pub fn build(ids_in_display_order: &[i64], page_size: u32) -> Self {
        let page_size = page_size.max(1) as usize;
        let pages = ids_in_display_order
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, (index / page_size + 1) as u32))
            .collect();
        Self { pages }
    }

    /// Page number showing the given post.
    pub fn page_of(&self, id: i64) -> Option<u32> {
        self.pages.get(&id).copied()
    }

    /// Number of indexed posts.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Render a post body as HTML.
///
/// The body is escaped, `>>N` becomes a link to `?page=P#entry-N` when post N
/// is indexed, and line breaks become `<br>`.
pub fn render_body(body: &str, index: &PageIndex) -> String {
    let normalized = body.replace("\r\n", "\n").replace('\r', "\n");
    let escaped = escape(&normalized, Html).to_string();

    let linked = anchor_regex().replace_all(&escaped, |caps: &Captures| {
        let digits = &caps[1];
        match digits.parse::<i64>().ok().and_then(|id| {
            index.page_of(id).map(|page| (id, page))
        }) {
            Some((id, page)) => format!(
                "<a href=\"?page={page}#entry-{id}\" class=\"res-link\">&gt;&gt;{digits}</a>"
            ),
            None => caps[0].to_string(),
        }
    });

    linked.replace('\n', "<br>\n")
}
