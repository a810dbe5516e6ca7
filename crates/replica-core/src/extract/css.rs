//! `url(...)` references inside stylesheet text.

use regex::Regex;
use std::sync::LazyLock;

/// `url(` token (any case), optional quote, the reference, optional quote, `)`.
static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i:url)\(['"]?([^'")\s]+)['"]?\)"#).expect("CSS_URL_RE: hardcoded regex is valid")
});

/// All `url()` references in `css`, in order of appearance, duplicates kept.
pub fn url_references(css: &str) -> impl Iterator<Item = &str> {
    CSS_URL_RE
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}
