//! Asset discovery: which images and stylesheets a page references.
//!
//! Parses the markup and returns references exactly as written. Images are the
//! `<img src>` values in document order followed by every `url()` found in
//! inline `<style>` blocks. Duplicates are kept; `data:` URLs are dropped.
//! Scripts, fonts, favicons and media are not discovered.

mod css;

pub use css::url_references;

use serde::Serialize;

use crate::dom::{self, Selected};
use crate::url_model::is_data_url;

/// Ordered asset references discovered in a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveredAssets {
    pub images: Vec<String>,
    pub stylesheets: Vec<String>,
}

impl DiscoveredAssets {
    pub fn total(&self) -> usize {
        self.images.len() + self.stylesheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn is_asset_reference(value: &str) -> bool {
    !value.is_empty() && !is_data_url(value)
}

/// Discovers image and stylesheet references in `markup`.
pub fn extract(markup: &str) -> DiscoveredAssets {
    let doc = dom::parse(markup);

    let mut images = Vec::new();
    let mut style_images = Vec::new();
    let mut stylesheets = Vec::new();

    dom::walk(&doc.document, &mut |node| match dom::classify(node) {
        Some(Selected::Image) => {
            if let Some(src) = dom::get_attr(node, "src").filter(|v| is_asset_reference(v)) {
                images.push(src);
            }
        }
        Some(Selected::StylesheetLink) => {
            if let Some(href) = dom::get_attr(node, "href").filter(|v| is_asset_reference(v)) {
                stylesheets.push(href);
            }
        }
        Some(Selected::Style) => {
            for text in dom::text_children(node) {
                if let markup5ever_rcdom::NodeData::Text { contents } = &text.data {
                    style_images.extend(
                        url_references(&contents.borrow())
                            .filter(|r| !is_data_url(r))
                            .map(str::to_string),
                    );
                }
            }
        }
        None => {}
    });

    images.extend(style_images);
    tracing::debug!(
        images = images.len(),
        stylesheets = stylesheets.len(),
        "discovered assets"
    );
    DiscoveredAssets {
        images,
        stylesheets,
    }
}
