//! Placeholder token substitution.
//!
//! Templates are plain HTML files containing literal `{{name}}` tokens.
//! There is no template language — no conditionals, no loops, no
//! expressions. Every token is replaced by a string, in one of two modes:
//!
//! - **Inline**: direct string replacement. Used for single-line values
//!   (titles, meta descriptions, path prefixes).
//! - **Indented**: for multi-line block content (navbar, body, footer).
//!   The token's own line in the template determines a reference indent,
//!   and every content line after the first is prefixed with it so the
//!   generated HTML nesting stays correct.
//!
//! ## Substitution Order
//!
//! Order matters: injected block content may itself contain tokens (a
//! standalone page's `head.html` can reference `{{basePath}}`). Callers
//! therefore pass an explicit ordered list of [`Substitution`] rules to
//! [`apply`], with structural blocks first and flat/global tokens last.
//! The order is part of the API, never an accident of call sequence.

/// How a token's replacement content is merged into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plain string replacement, no indentation handling.
    Inline,
    /// Multi-line content indented to match the token's line.
    Indented,
}

/// One (token, content, mode) substitution rule.
#[derive(Debug, Clone)]
pub struct Substitution {
    tag: String,
    content: String,
    mode: Mode,
}

impl Substitution {
    /// Inline rule for the token named `name` (without braces).
    pub fn inline(name: &str, content: impl Into<String>) -> Self {
        Self {
            tag: tag_for(name),
            content: content.into(),
            mode: Mode::Inline,
        }
    }

    /// Indent-preserving rule for the token named `name` (without braces).
    pub fn indented(name: &str, content: impl Into<String>) -> Self {
        Self {
            tag: tag_for(name),
            content: content.into(),
            mode: Mode::Indented,
        }
    }
}

/// The literal `{{name}}` marker for a token name.
pub fn tag_for(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Apply an ordered list of substitution rules to a template.
pub fn apply(template: &str, rules: &[Substitution]) -> String {
    let mut html = template.to_string();
    for rule in rules {
        html = match rule.mode {
            Mode::Inline => html.replace(&rule.tag, &rule.content),
            Mode::Indented => replace_indented(&html, &rule.tag, &rule.content),
        };
    }
    html
}

/// Replace a template tag, indenting content lines to match the tag's position.
///
/// When a tag like `{{bodyContent}}` sits on its own line with leading
/// whitespace, the lines of the replacement content after the first are
/// indented to the same level. The first line is left alone — it inherits
/// whatever precedes the tag in the template. Blank lines are also left
/// alone so indenting doesn't leave trailing whitespace behind.
///
/// If the tag never appears at the start of a line (or appears at column
/// zero), this degrades to a plain inline replacement. Deeply nested
/// content substituted through that fallback keeps its own indentation
/// as-is; that is a known limitation, not something this function tries
/// to repair.
pub fn replace_indented(template: &str, tag: &str, content: &str) -> String {
    // Empty content removes the tag entirely rather than leaving a blank line.
    if content.is_empty() {
        return template.replace(tag, "");
    }

    let indent = template.lines().find_map(|line| {
        let stripped = line.trim_start();
        if stripped.starts_with(tag) {
            Some(&line[..line.len() - stripped.len()])
        } else {
            None
        }
    });

    let indent = match indent {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => return template.replace(tag, content),
    };

    let mut lines = content.split('\n');
    let mut merged = String::with_capacity(content.len());
    if let Some(first) = lines.next() {
        merged.push_str(first);
    }
    for line in lines {
        merged.push('\n');
        if !line.trim().is_empty() {
            merged.push_str(indent);
        }
        merged.push_str(line);
    }

    template.replace(tag, &merged)
}
