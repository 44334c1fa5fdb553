use std::sync::LazyLock;

use regex::Regex;

use super::{Page, PageType};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-_.]").expect("valid regex"));

/// True for the page treated as the site's home page.
pub fn is_home_page(page: &Page) -> bool {
    page.page_type == PageType::Homepage || page.name.trim().eq_ignore_ascii_case("home")
}

/// Home pages first, then the rest alphabetically (case-insensitive).
pub fn sort_pages_for_display(pages: &[Page]) -> Vec<&Page> {
    let mut sorted: Vec<&Page> = pages.iter().collect();
    sorted.sort_by(|a, b| {
        is_home_page(b)
            .cmp(&is_home_page(a))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// File-name-safe slug for a page name: `"About Us"` → `"about-us"`.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    DISALLOWED.replace_all(&dashed, "").into_owned()
}
