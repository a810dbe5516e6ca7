//! Asset resolution: absolute URL, download, local archive path.
//!
//! Downloads run sequentially in two passes (images, then stylesheets). A failed
//! download is logged and skipped: it gets no map entry and no archive file.
//! Derived filenames are not disambiguated; two references ending in the same
//! segment share an archive path and the later payload wins when packaged.

mod asset_map;

pub use asset_map::AssetMap;

use serde::Serialize;
use url::Url;

use crate::capture::{CaptureEvent, CaptureObserver};
use crate::extract::DiscoveredAssets;
use crate::fetcher::Fetch;
use crate::url_model::{last_segment, resolve_against};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Stylesheet,
}

impl AssetKind {
    /// Archive directory for this kind.
    pub fn dir(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Stylesheet => "styles",
        }
    }

    /// Name used when the reference has no usable last segment.
    /// `n` is the number of assets downloaded so far in this capture.
    pub fn synthesized_name(self, n: usize) -> String {
        match self {
            AssetKind::Image => format!("image_{n}.jpg"),
            AssetKind::Stylesheet => format!("style_{n}.css"),
        }
    }

    /// `images/<name>` or `styles/<name>` for `reference`.
    pub fn local_path(self, reference: &str, downloaded: usize) -> String {
        let name = last_segment(reference)
            .map(str::to_string)
            .unwrap_or_else(|| self.synthesized_name(downloaded));
        format!("{}/{}", self.dir(), name)
    }
}

/// One downloaded asset.
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub kind: AssetKind,
    /// Reference exactly as written in the page.
    pub original_reference: String,
    pub absolute_url: Url,
    pub payload: Vec<u8>,
    pub byte_size: u64,
    pub local_path: String,
}

/// Discovered (not downloaded) asset counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssetCounts {
    pub images: usize,
    pub stylesheets: usize,
}

impl From<&DiscoveredAssets> for AssetCounts {
    fn from(d: &DiscoveredAssets) -> Self {
        Self {
            images: d.images.len(),
            stylesheets: d.stylesheets.len(),
        }
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub asset_map: AssetMap,
    /// Successful downloads in download order.
    pub assets: Vec<ResolvedAsset>,
    /// Counts of discovered references, including ones that failed to download.
    pub counts: AssetCounts,
    pub total_bytes: u64,
}

struct Pass<'a, F: Fetch + ?Sized, O: CaptureObserver + ?Sized> {
    page_url: &'a Url,
    fetcher: &'a F,
    observer: &'a mut O,
    total: usize,
    out: Resolution,
}

impl<F: Fetch + ?Sized, O: CaptureObserver + ?Sized> Pass<'_, F, O> {
    fn run(&mut self, kind: AssetKind, references: &[String]) {
        for reference in references {
            if let Some(asset) = self.download(kind, reference) {
                self.record(asset);
            }
        }
    }

    fn download(&self, kind: AssetKind, reference: &str) -> Option<ResolvedAsset> {
        let absolute_url = match resolve_against(self.page_url, reference) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(reference, error = %e, "failed to download asset: unresolvable reference");
                return None;
            }
        };
        let response = match self.fetcher.fetch(absolute_url.as_str()) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(reference, error = %e, "failed to download asset");
                return None;
            }
        };
        let local_path = kind.local_path(reference, self.out.assets.len());
        let byte_size = response.body.len() as u64;
        tracing::debug!(
            reference,
            url = %absolute_url,
            path = %local_path,
            bytes = byte_size,
            status = response.status,
            content_type = response.content_type.as_deref().unwrap_or("-"),
            "downloaded asset"
        );
        Some(ResolvedAsset {
            kind,
            original_reference: reference.to_string(),
            absolute_url,
            payload: response.body,
            byte_size,
            local_path,
        })
    }

    fn record(&mut self, asset: ResolvedAsset) {
        self.out
            .asset_map
            .insert(asset.original_reference.clone(), asset.local_path.clone());
        self.out.total_bytes += asset.byte_size;
        self.out.assets.push(asset);
        self.observer.on_event(&CaptureEvent::AssetProgress {
            downloaded: self.out.assets.len(),
            total: self.total,
        });
    }
}

/// Downloads every discovered reference and assigns archive paths.
///
/// Images are resolved first, in list order, then stylesheets. Relative
/// references are resolved against `page_url`; map keys are the original
/// strings.
pub fn resolve<F, O>(
    discovered: &DiscoveredAssets,
    page_url: &Url,
    fetcher: &F,
    observer: &mut O,
) -> Resolution
where
    F: Fetch + ?Sized,
    O: CaptureObserver + ?Sized,
{
    let mut pass = Pass {
        page_url,
        fetcher,
        observer,
        total: discovered.total(),
        out: Resolution {
            counts: AssetCounts::from(discovered),
            ..Resolution::default()
        },
    };
    pass.run(AssetKind::Image, &discovered.images);
    pass.run(AssetKind::Stylesheet, &discovered.stylesheets);

    let out = pass.out;
    if out.assets.len() < discovered.total() {
        tracing::info!(
            downloaded = out.assets.len(),
            discovered = discovered.total(),
            "some assets could not be downloaded"
        );
    }
    out
}
