//! End-to-end capture: page fetch → discovery → resolution → rewrite.
//!
//! A failure to validate or fetch the page ends the capture with a
//! [`CaptureError`]; individual asset failures only shrink the result.

mod events;

pub use events::{CaptureEvent, CaptureObserver};

use url::Url;

use crate::config::ReplicaConfig;
use crate::error::CaptureError;
use crate::extract::extract;
use crate::fetcher::{CurlFetcher, Fetch};
use crate::resolve::{resolve, AssetCounts, AssetMap, ResolvedAsset};
use crate::rewrite::rewrite;

/// Everything the packager needs for one page.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub page_url: Url,
    pub final_markup: String,
    /// Downloaded assets, images first, in download order.
    pub assets: Vec<ResolvedAsset>,
    pub asset_map: AssetMap,
    /// Discovered counts (attempted, not necessarily downloaded).
    pub counts: AssetCounts,
    pub total_bytes: u64,
}

impl CaptureResult {
    /// Total payload size in KiB, rounded to nearest (as shown to users).
    pub fn total_kib(&self) -> u64 {
        (self.total_bytes + 512) / 1024
    }
}

/// Validates a page URL string (surrounding whitespace ignored).
pub fn parse_page_url(input: &str) -> Result<Url, CaptureError> {
    Url::parse(input.trim()).map_err(|source| CaptureError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

/// Captures `page_url` and every image and stylesheet it references.
///
/// The URL is validated before any network work. Events are reported to
/// `observer` in order; the final one is `Completed` or `Failed`.
pub fn generate_replica<F, O>(
    page_url: &str,
    fetcher: &F,
    observer: &mut O,
) -> Result<CaptureResult, CaptureError>
where
    F: Fetch + ?Sized,
    O: CaptureObserver + ?Sized,
{
    let result = run(page_url, fetcher, observer);
    match &result {
        Ok(capture) => observer.on_event(&CaptureEvent::Completed {
            counts: capture.counts,
            total_bytes: capture.total_bytes,
        }),
        Err(e) => {
            tracing::error!(url = page_url, error = %e, "capture failed");
            observer.on_event(&CaptureEvent::Failed {
                reason: e.to_string(),
            });
        }
    }
    result
}

fn run<F, O>(input: &str, fetcher: &F, observer: &mut O) -> Result<CaptureResult, CaptureError>
where
    F: Fetch + ?Sized,
    O: CaptureObserver + ?Sized,
{
    let page_url = parse_page_url(input)?;

    observer.on_event(&CaptureEvent::PageFetchStarted {
        url: page_url.to_string(),
    });
    let markup = fetcher.fetch(page_url.as_str())?.text();

    let discovered = extract(&markup);
    observer.on_event(&CaptureEvent::AssetsDiscovered {
        total: discovered.total(),
    });
    tracing::info!(url = %page_url, assets = discovered.total(), "page fetched");

    let resolution = resolve(&discovered, &page_url, fetcher, observer);

    observer.on_event(&CaptureEvent::Rewriting);
    let final_markup = rewrite(&markup, &resolution.asset_map)?;

    tracing::info!(
        url = %page_url,
        images = resolution.counts.images,
        stylesheets = resolution.counts.stylesheets,
        downloaded = resolution.assets.len(),
        bytes = resolution.total_bytes,
        "capture complete"
    );
    Ok(CaptureResult {
        page_url,
        final_markup,
        assets: resolution.assets,
        asset_map: resolution.asset_map,
        counts: resolution.counts,
        total_bytes: resolution.total_bytes,
    })
}

/// Capture entry point bundling a configured fetcher.
#[derive(Debug, Clone, Default)]
pub struct Replicator<F = CurlFetcher> {
    fetcher: F,
}

impl Replicator<CurlFetcher> {
    pub fn from_config(cfg: &ReplicaConfig) -> Self {
        Self::with_fetcher(CurlFetcher::from_config(cfg))
    }
}

impl<F: Fetch> Replicator<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn capture(&self, page_url: &str) -> Result<CaptureResult, CaptureError> {
        generate_replica(page_url, &self.fetcher, &mut ())
    }

    pub fn capture_with<O: CaptureObserver + ?Sized>(
        &self,
        page_url: &str,
        observer: &mut O,
    ) -> Result<CaptureResult, CaptureError> {
        generate_replica(page_url, &self.fetcher, observer)
    }
}
