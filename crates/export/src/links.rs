//! Rewrites builder links into links between exported files.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use wirekit_core::model::display::slugify;

pub const INDEX_FILE: &str = "index.html";
pub const SHOWCASE_FILE: &str = "showcase.html";

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]*)""#).expect("valid regex"));

/// Anchors and paths that always mean the welcome page.
const HOME_TARGETS: &[&str] = &["/", "/home", "/index", "/index.html", "#home", "#top-of-site"];

/// Page slug → exported file name.
#[derive(Debug, Clone, Default)]
pub struct LinkMap {
    files: BTreeMap<String, String>,
}

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. The first registration for a slug wins.
    pub fn insert(&mut self, slug: impl Into<String>, file_name: impl Into<String>) {
        self.files.entry(slug.into()).or_insert_with(|| file_name.into());
    }

    pub fn file_for(&self, slug: &str) -> Option<&str> {
        self.files.get(slug).map(String::as_str)
    }

    /// Target for one href, or `None` to leave it as is.
    pub fn rewrite_href(&self, href: &str) -> Option<String> {
        let trimmed = href.trim();
        let lowered = trimmed.to_lowercase();
        let normalized = match lowered.trim_end_matches('/') {
            "" if lowered.starts_with('/') => "/",
            other => other,
        };

        if HOME_TARGETS.contains(&normalized) {
            return Some(INDEX_FILE.to_string());
        }
        if normalized == "/showcase" || normalized == "/showcase.html" {
            return Some(SHOWCASE_FILE.to_string());
        }

        // Protocol-relative URLs are external.
        if normalized.starts_with("//") {
            return None;
        }

        if let Some(path) = normalized.strip_prefix('/') {
            let path = path.split(['?', '#']).next().unwrap_or_default();
            let last = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default();
            let slug = slugify(last.trim_end_matches(".html"));
            if slug.is_empty() {
                return Some(INDEX_FILE.to_string());
            }
            return Some(
                self.file_for(&slug)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{slug}.html")),
            );
        }

        if let Some(fragment) = normalized.strip_prefix('#') {
            if fragment.is_empty() {
                return None;
            }
            return self.file_for(&slugify(fragment)).map(str::to_string);
        }

        None
    }
}

/// Rewrite every `href="…"` in serialized HTML.
pub fn rewrite_links(html: &str, links: &LinkMap) -> String {
    HREF.replace_all(html, |caps: &Captures<'_>| match links.rewrite_href(&caps[1]) {
        Some(target) => format!("href=\"{target}\""),
        None => caps[0].to_string(),
    })
    .into_owned()
}
