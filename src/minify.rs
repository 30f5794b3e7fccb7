//! HTML minification.
//!
//! A deliberately simple, lossy transform for generated pages: strip HTML
//! comments, drop whitespace between adjacent tags, and collapse every
//! remaining whitespace run (including newlines) to a single space. The
//! result is a one-line document. Minifying already-minified content is a
//! no-op, which the change-aware writer relies on: it minifies *before*
//! comparing against the file on disk, so a rebuild never reports a page
//! as changed when only its pre-minification formatting differs.

use regex::Regex;
use std::sync::LazyLock;

static COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Remove HTML comments and collapse all whitespace into a single line.
pub fn minify_html(html: &str) -> String {
    let text = COMMENTS.replace_all(html, "");
    let text = BETWEEN_TAGS.replace_all(&text, "><");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
