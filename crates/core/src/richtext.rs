//! Rich text boundary: user-authored HTML string → allow-listed HTML.
//!
//! The builder's rich text editor produces an HTML string. Before that string
//! is embedded in a rendered page it passes through [`sanitize`], which keeps
//! a small set of formatting tags and drops everything else (scripts, styles,
//! event handler attributes, `javascript:` URLs).

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "ul", "ol", "li", "a", "h2", "h3", "h4",
    "blockquote", "span",
];

static DANGEROUS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|iframe|object|embed)\b.*?</(script|style|iframe|object|embed)\s*>")
        .expect("valid regex")
});

/// A complete tag. Quoted attribute values may contain `>`.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)((?:"[^"]*"|'[^']*'|[^'">])*)>"#)
        .expect("valid regex")
});

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

/// Keep allow-listed tags only. `<a>` keeps a safe `href`; every other
/// attribute is dropped. Angle brackets outside a complete tag are escaped,
/// so an unterminated tag comes out as text.
pub fn sanitize(html: &str) -> String {
    let without_blocks = DANGEROUS_BLOCK.replace_all(html, "");
    let mut out = String::with_capacity(without_blocks.len());
    let mut last = 0;
    for caps in TAG.captures_iter(&without_blocks) {
        let Some(whole) = caps.get(0) else { continue };
        escape_brackets(&without_blocks[last..whole.start()], &mut out);
        out.push_str(&clean_tag(&caps));
        last = whole.end();
    }
    escape_brackets(&without_blocks[last..], &mut out);
    out
}

fn clean_tag(caps: &Captures<'_>) -> String {
    let closing = &caps[1];
    let tag = caps[2].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&tag.as_str()) {
        return String::new();
    }
    if closing == "/" {
        return format!("</{tag}>");
    }
    if tag == "a" {
        let href = HREF
            .captures(&caps[3])
            .and_then(|h| h.get(1).or_else(|| h.get(2)))
            .map(|m| m.as_str().trim().to_string())
            .filter(|h| is_safe_href(h));
        return match href {
            Some(href) => format!("<a href=\"{}\">", crate::render::escape_attr(&href)),
            None => "<a>".to_string(),
        };
    }
    format!("<{tag}>")
}

/// Entities written by the editor pass through untouched.
fn escape_brackets(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn is_safe_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:"))
}

/// Strip all markup, leaving text content. Used for summaries and titles.
pub fn to_plain_text(html: &str) -> String {
    let without_blocks = DANGEROUS_BLOCK.replace_all(html, "");
    let text = TAG.replace_all(&without_blocks, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
