//! Literal `url(<reference>)` substitution in stylesheet text.

use regex::{NoExpand, Regex};

use crate::resolve::AssetMap;

/// Pattern matching `url(<reference>)` with any quoting, the reference taken literally.
fn reference_pattern(reference: &str) -> Regex {
    let pattern = format!(r#"(?i:url)\(['"]?{}['"]?\)"#, regex::escape(reference));
    // Escaped input only ever yields a valid pattern.
    Regex::new(&pattern).expect("escaped url() pattern is valid")
}

/// `url()` substitutions for every [`AssetMap`] key, compiled once and applied
/// to any number of stylesheet texts.
#[derive(Debug, Clone)]
pub struct CssUrlRewriter {
    rules: Vec<(Regex, String)>,
}

impl CssUrlRewriter {
    pub fn new(asset_map: &AssetMap) -> Self {
        let rules = asset_map
            .iter()
            .map(|(reference, local_path)| {
                (reference_pattern(reference), format!("url('{local_path}')"))
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replaces every `url(<key>)` in `css` with `url('<local path>')`, key by
    /// key in map order.
    pub fn apply(&self, css: &str) -> String {
        let mut out = css.to_string();
        for (re, replacement) in &self.rules {
            out = re.replace_all(&out, NoExpand(replacement.as_str())).into_owned();
        }
        out
    }
}

/// One-off form of [`CssUrlRewriter::apply`].
pub fn rewrite_css_urls(css: &str, asset_map: &AssetMap) -> String {
    CssUrlRewriter::new(asset_map).apply(css)
}
