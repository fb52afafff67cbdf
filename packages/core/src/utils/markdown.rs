//! Markdown Stripping
//!
//! Reduces inline markdown to plain text. Used by the importer to turn a
//! heading line into a clean node name, and usable anywhere a display label
//! is derived from markdown content.

use regex::Regex;
use std::sync::LazyLock;

/// Pattern table applied in order. Ordering matters: images before links
/// (both use brackets), bold before italic (`**` contains `*`), inline
/// spans before the line-start markers.
static INLINE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // ![alt](url) -> alt
        (Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap(), "$1"),
        // [text](url) -> text
        (Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(), "$1"),
        // `code` -> code
        (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
        // **bold** / __bold__ -> bold
        (Regex::new(r"\*\*([^*]+)\*\*").unwrap(), "$1"),
        (Regex::new(r"__([^_]+)__").unwrap(), "$1"),
        // ~~strike~~ -> strike
        (Regex::new(r"~~([^~]+)~~").unwrap(), "$1"),
        // *italic* / _italic_ -> italic, after bold
        (Regex::new(r"\*([^*]+)\*").unwrap(), "$1"),
        (Regex::new(r"_([^_]+)_").unwrap(), "$1"),
        // Line-start markers: headings, blockquotes, list items, rules
        (Regex::new(r"^#{1,6}\s+").unwrap(), ""),
        (Regex::new(r"^>\s*").unwrap(), ""),
        (Regex::new(r"^\d+\.\s+").unwrap(), ""),
        (Regex::new(r"^[-*+]\s+").unwrap(), ""),
        (Regex::new(r"^[-*_]{3,}$").unwrap(), ""),
        // Bare HTML tags
        (Regex::new(r"<[^>]+>").unwrap(), ""),
    ]
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown formatting, collapsing the result to single-spaced,
/// trimmed plain text.
///
/// # Examples
///
/// ```
/// use idiampro_core::utils::strip_markdown;
///
/// assert_eq!(strip_markdown("## Project **Plan**"), "Project Plan");
/// assert_eq!(strip_markdown("[docs](https://example.com)"), "docs");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut result = content.to_string();

    for (pattern, replacement) in INLINE_PATTERNS.iter() {
        // Anchored patterns must see each line's start, not just the string's
        if pattern.as_str().starts_with('^') {
            result = result
                .lines()
                .map(|line| pattern.replace_all(line, *replacement).to_string())
                .collect::<Vec<_>>()
                .join("\n");
        } else {
            result = pattern.replace_all(&result, *replacement).to_string();
        }
    }

    WHITESPACE_RE.replace_all(&result, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_headings() {
        assert_eq!(strip_markdown("# Top"), "Top");
        assert_eq!(strip_markdown("### Deep Section"), "Deep Section");
        assert_eq!(strip_markdown("###### Level Six"), "Level Six");
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_markdown("**bold**"), "bold");
        assert_eq!(strip_markdown("__bold__"), "bold");
        assert_eq!(strip_markdown("*italic*"), "italic");
        assert_eq!(strip_markdown("_italic_"), "italic");
        assert_eq!(strip_markdown("~~gone~~"), "gone");
    }

    #[test]
    fn test_strip_links_and_images() {
        assert_eq!(strip_markdown("[home](https://example.com)"), "home");
        assert_eq!(strip_markdown("![logo](logo.png)"), "logo");
        assert_eq!(strip_markdown("![](decorative.png)"), "");
    }

    #[test]
    fn test_strip_inline_code() {
        assert_eq!(strip_markdown("run `cargo fmt` first"), "run cargo fmt first");
    }

    #[test]
    fn test_strip_list_and_quote_markers() {
        assert_eq!(strip_markdown("- item"), "item");
        assert_eq!(strip_markdown("3. item"), "item");
        assert_eq!(strip_markdown("> wisdom"), "wisdom");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_markdown("<em>soft</em>"), "soft");
    }

    #[test]
    fn test_combined_and_multiline() {
        assert_eq!(
            strip_markdown("## **Q3** [report](q3.md)"),
            "Q3 report"
        );
        assert_eq!(
            strip_markdown("# Title\n\nBody **text**\n- point"),
            "Title Body text point"
        );
    }

    #[test]
    fn test_plain_text_and_whitespace() {
        assert_eq!(strip_markdown("untouched"), "untouched");
        assert_eq!(strip_markdown("   "), "");
        assert_eq!(strip_markdown("  padded  "), "padded");
    }
}
