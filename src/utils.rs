//! String and date helpers for turning raw provider fields into display text.
//!
//! This module provides the small pure functions the record mapper is built
//! from:
//! - Character-based truncation with an ellipsis marker
//! - HTML-to-plain-text stripping for trail text
//! - Publication date formatting in the feed's fixed display timezone

use chrono::{DateTime, FixedOffset};
use scraper::Html;

/// The fixed display offset for publication dates (UTC+7).
const DISPLAY_OFFSET_SECS: i32 = 7 * 3600;

/// Truncate a string to at most `max` characters, appending `"..."` when
/// anything was cut off.
///
/// Truncation counts `char`s, not bytes, so multi-byte text is never split
/// inside a code point.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_with_ellipsis("short", 80), "short");
/// assert_eq!(truncate_with_ellipsis(&"a".repeat(90), 80).len(), 83);
/// ```
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    }
}

/// Strip HTML markup from a snippet, returning its plain text content.
///
/// The provider's trail text may carry inline markup (`<b>`, `<em>`, links).
/// The snippet is parsed as an inert HTML fragment and its text nodes are
/// collected; nothing in the input is ever evaluated as script or style.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_html("<b>Big</b> win"), "Big win");
/// ```
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Format an RFC 3339 publication timestamp for display.
///
/// Returns `None` when the timestamp does not parse; callers omit the date
/// from the source label in that case.
pub fn format_publication_date(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
    let local = parsed.with_timezone(&offset);
    Some(local.format("%b %-d, %Y, %-I:%M %p").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        let title = "a".repeat(79);
        assert_eq!(truncate_with_ellipsis(&title, 80), title);
    }

    #[test]
    fn test_truncate_at_boundary_unchanged() {
        let title = "a".repeat(80);
        assert_eq!(truncate_with_ellipsis(&title, 80), title);
    }

    #[test]
    fn test_truncate_long_string_appends_ellipsis() {
        let title = "a".repeat(90);
        let result = truncate_with_ellipsis(&title, 80);
        assert_eq!(result, format!("{}...", "a".repeat(80)));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let title = "é".repeat(85);
        let result = truncate_with_ellipsis(&title, 80);
        assert_eq!(result, format!("{}...", "é".repeat(80)));
    }

    #[test]
    fn test_strip_html_inline_markup() {
        assert_eq!(strip_html("<b>Big</b> win"), "Big win");
    }

    #[test]
    fn test_strip_html_nested_markup() {
        assert_eq!(
            strip_html("<p>The <em>quick</em> <a href=\"/x\">fox</a></p>"),
            "The quick fox"
        );
    }

    #[test]
    fn test_strip_html_plain_text_passthrough() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn test_strip_html_does_not_evaluate_script() {
        // Script bodies survive as inert text; nothing runs.
        let out = strip_html("<script>alert(1)</script>done");
        assert!(out.ends_with("done"));
    }

    #[test]
    fn test_format_publication_date_shifts_to_display_offset() {
        // 18:30 UTC is 01:30 the next day at UTC+7.
        let formatted = format_publication_date("2025-03-10T18:30:00Z").unwrap();
        assert_eq!(formatted, "Mar 11, 2025, 1:30 AM");
    }

    #[test]
    fn test_format_publication_date_rejects_garbage() {
        assert_eq!(format_publication_date("not a date"), None);
        assert_eq!(format_publication_date(""), None);
    }
}
