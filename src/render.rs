//! Terminal implementation of the render target.
//!
//! Formatting is kept in pure functions returning strings so it can be unit
//! tested; [`TerminalView`] just writes them to stdout. Skeleton cards,
//! notices, and toasts are plain text stand-ins for the styled elements a
//! graphical surface would draw.

use crate::feed::FeedView;
use crate::models::ArticleRecord;
use crate::query::NAV_CATEGORIES;

/// Renders the feed as text blocks on stdout.
#[derive(Debug, Default)]
pub struct TerminalView {
    card_index: usize,
    load_more_visible: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last load left another page available.
    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }
}

/// One article card as a text block.
fn format_card(index: usize, record: &ArticleRecord) -> String {
    let mut out = format!("[{index}] {}\n    {}\n", record.title, record.source_label);
    if !record.description.is_empty() {
        out.push_str(&format!("    {}\n", record.description));
    }
    match &record.target_url {
        Some(url) => out.push_str(&format!("    {url}\n")),
        None => out.push_str("    (no link available)\n"),
    }
    out.push_str(&format!("    img: {}\n", record.image_url));
    out
}

/// The nav bar with the active category bracketed.
fn format_nav(active: Option<&str>) -> String {
    let items: Vec<String> = NAV_CATEGORIES
        .iter()
        .map(|&cat| {
            if Some(cat) == active {
                format!("[{cat}]")
            } else {
                cat.to_string()
            }
        })
        .collect();
    format!("sections: {}", items.join("  "))
}

impl FeedView for TerminalView {
    fn clear(&mut self) {
        self.card_index = 0;
        println!("{}", "-".repeat(72));
    }

    fn show_skeletons(&mut self, count: usize) {
        for _ in 0..count {
            println!("[ ...          loading          ... ]");
        }
    }

    fn append_card(&mut self, record: &ArticleRecord) {
        self.card_index += 1;
        println!("{}", format_card(self.card_index, record));
    }

    fn show_notice(&mut self, message: &str) {
        println!("{message}");
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
        if visible {
            println!("(type 'more' for the next page)");
        }
    }

    fn toast(&mut self, message: &str) {
        eprintln!("! {message}");
    }

    fn set_active_nav(&mut self, category: Option<&str>) {
        println!("{}", format_nav(category));
    }
}
