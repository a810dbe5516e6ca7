//! Markup rewriting: point asset references at their archive copies.
//!
//! Re-parses the original markup with the same selection rules as the
//! extractor. Attribute values are replaced only on an exact match with an
//! [`AssetMap`] key; inline `<style>` text gets a literal `url()` substitution
//! for every key. Anything without a map entry is left as it was.

mod css;

pub use css::{rewrite_css_urls, CssUrlRewriter};

use markup5ever_rcdom::NodeData;

use crate::dom;
use crate::error::RewriteError;
use crate::resolve::AssetMap;

/// Returns `markup` serialized with every mapped reference replaced.
pub fn rewrite(markup: &str, asset_map: &AssetMap) -> Result<String, RewriteError> {
    let doc = dom::parse(markup);
    let css = CssUrlRewriter::new(asset_map);
    let mut attributes = 0usize;

    dom::walk(&doc.document, &mut |node| {
        let Some(selected) = dom::classify(node) else {
            return;
        };
        match selected.url_attribute() {
            Some(name) => {
                let local = dom::get_attr(node, name)
                    .and_then(|value| asset_map.get(&value).map(str::to_string));
                if let Some(local) = local {
                    dom::set_attr(node, name, &local);
                    attributes += 1;
                }
            }
            None if !css.is_empty() => {
                for text in dom::text_children(node) {
                    if let NodeData::Text { contents } = &text.data {
                        let rewritten = css.apply(&contents.borrow());
                        *contents.borrow_mut() = rewritten.into();
                    }
                }
            }
            None => {}
        }
    });

    tracing::debug!(attributes, "rewrote asset references");
    let html = dom::to_html(&doc)?;
    Ok(String::from_utf8(html)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;

    fn map(pairs: &[(&str, &str)]) -> AssetMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn rewrites_img_and_stylesheet_link() {
        let html = r#"<html><head><link rel="stylesheet" href="s.css"></head><body><img src="p.jpg"></body></html>"#;
        let out = rewrite(
            html,
            &map(&[("s.css", "styles/s.css"), ("p.jpg", "images/p.jpg")]),
        )
        .unwrap();
        assert!(out.contains(r#"href="styles/s.css""#));
        assert!(out.contains(r#"src="images/p.jpg""#));
        assert!(!out.contains(r#""s.css""#));
    }

    #[test]
    fn unmapped_reference_is_left_unchanged() {
        let html = r#"<img src="https://cdn.test/a.png?x=1&amp;y=2"><img src="b.png">"#;
        let out = rewrite(html, &map(&[("b.png", "images/b.png")])).unwrap();
        assert!(out.contains(r#"<img src="https://cdn.test/a.png?x=1&amp;y=2">"#));
        assert!(out.contains(r#"<img src="images/b.png">"#));
    }

    #[test]
    fn no_matches_keeps_attribute_values() {
        let html = r#"<!DOCTYPE html><html lang="en"><head><link rel="stylesheet" href="a.css"><style>x{background:url(q.png)}</style></head><body><img src="i.png" alt="pic"></body></html>"#;
        let out = rewrite(html, &map(&[("z.png", "images/z.png")])).unwrap();
        assert_eq!(extract(&out), extract(html));
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains(r#"<html lang="en">"#));
        assert!(out.contains(r#"<img src="i.png" alt="pic">"#));
        assert!(out.contains("x{background:url(q.png)}"));
    }

    #[test]
    fn inline_style_urls_rewritten_literally() {
        let html = r#"<style>a{background:url("./bg.png")} b{background:url(bg.png)}</style>"#;
        let out = rewrite(html, &map(&[("./bg.png", "images/bg.png")])).unwrap();
        assert!(out.contains(r#"a{background:url('images/bg.png')} b{background:url(bg.png)}"#));
    }

    #[test]
    fn stylesheet_link_with_mixed_case_rel_is_rewritten() {
        let html = r#"<link rel="StyleSheet" href="s.css">"#;
        let out = rewrite(html, &map(&[("s.css", "styles/s.css")])).unwrap();
        assert!(out.contains(r#"<link rel="StyleSheet" href="styles/s.css">"#));
    }

    #[test]
    fn data_urls_and_other_links_untouched() {
        let html = r#"<link rel="icon" href="a.png"><img src="data:image/png;base64,AA">"#;
        let out = rewrite(html, &map(&[("a.png", "images/a.png")])).unwrap();
        assert!(out.contains(r#"<link rel="icon" href="a.png">"#));
        assert!(out.contains(r#"src="data:image/png;base64,AA""#));
    }
}
