pub mod config;
pub mod error;
pub mod logging;

pub mod capture;
pub mod dom;
pub mod extract;
pub mod fetcher;
pub mod package;
pub mod resolve;
pub mod rewrite;
pub mod url_model;

pub use capture::{
    generate_replica, parse_page_url, CaptureEvent, CaptureObserver, CaptureResult, Replicator,
};
pub use error::{AttemptError, CaptureError, FetchError, PackageError, RewriteError};
pub use extract::{extract, DiscoveredAssets};
pub use fetcher::{CurlFetcher, Fetch, FetchResponse};
pub use resolve::{resolve, AssetCounts, AssetKind, AssetMap, Resolution, ResolvedAsset};
pub use rewrite::rewrite;
