//! `replica discover <url>` – list referenced assets without downloading them.

use anyhow::Result;
use replica_core::config::ReplicaConfig;
use replica_core::{extract, parse_page_url, CurlFetcher, DiscoveredAssets, Fetch};

pub fn run_discover(cfg: &ReplicaConfig, url: &str, json: bool) -> Result<()> {
    let page_url = parse_page_url(url)?;
    let fetcher = CurlFetcher::from_config(cfg);
    let markup = fetcher.fetch(page_url.as_str())?.text();
    let assets = extract(&markup);

    if json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
    } else {
        print!("{}", format_listing(&assets));
    }
    Ok(())
}

fn format_listing(assets: &DiscoveredAssets) -> String {
    let mut out = String::new();
    out.push_str(&format!("Images ({}):\n", assets.images.len()));
    for r in &assets.images {
        out.push_str(&format!("  {r}\n"));
    }
    out.push_str(&format!("Stylesheets ({}):\n", assets.stylesheets.len()));
    for r in &assets.stylesheets {
        out.push_str(&format!("  {r}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_shows_both_kinds_in_order() {
        let assets = DiscoveredAssets {
            images: vec!["a.png".to_string(), "b.png".to_string()],
            stylesheets: vec!["s.css".to_string()],
        };
        assert_eq!(
            format_listing(&assets),
            "Images (2):\n  a.png\n  b.png\nStylesheets (1):\n  s.css\n"
        );
    }

    #[test]
    fn listing_empty() {
        assert_eq!(
            format_listing(&DiscoveredAssets::default()),
            "Images (0):\nStylesheets (0):\n"
        );
    }
}
