//! Error types for fetching, capture and packaging.
//!
//! Asset-level failures never surface through these types to the caller of a
//! capture; they are logged and the asset is skipped. Page-level failures end
//! the capture with a [`CaptureError`].

use thiserror::Error;

/// Failure of a single retrieval attempt (direct or relay).
#[derive(Debug, Error)]
pub enum AttemptError {
    /// libcurl reported an error (connection refused, DNS, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
    /// The relay URL could not be built from the configured endpoint.
    #[error("invalid relay endpoint: {0}")]
    RelayEndpoint(#[from] url::ParseError),
}

impl AttemptError {
    /// HTTP status of the failed attempt, if the server answered.
    pub fn status(&self) -> Option<u32> {
        match self {
            AttemptError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Both the direct attempt and the relay attempt (when enabled) failed.
#[derive(Debug, Error)]
#[error("failed to fetch {url}: {}", describe(.direct, .relay))]
pub struct FetchError {
    pub url: String,
    pub direct: AttemptError,
    /// `None` when the relay is disabled.
    pub relay: Option<AttemptError>,
}

fn describe(direct: &AttemptError, relay: &Option<AttemptError>) -> String {
    match relay {
        Some(relay) => format!("direct: {direct}; relay: {relay}"),
        None => format!("direct: {direct}"),
    }
}

impl FetchError {
    /// Status of the last attempt made, if the server answered it.
    pub fn last_status(&self) -> Option<u32> {
        self.relay.as_ref().unwrap_or(&self.direct).status()
    }
}

/// The markup could not be serialized after rewriting.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("serialize document: {0}")]
    Serialize(#[from] std::io::Error),
    #[error("serialized document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Page-level failure: the capture produced no result.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("invalid page URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to fetch page: {0}")]
    PageFetch(#[from] FetchError),
    #[error("failed to rewrite page: {0}")]
    Rewrite(#[from] RewriteError),
}

/// Failure while building the archive from a capture result.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_mentions_url_and_both_attempts() {
        let err = FetchError {
            url: "https://ex.test/a.png".to_string(),
            direct: AttemptError::Status(403),
            relay: Some(AttemptError::Status(502)),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://ex.test/a.png"));
        assert!(msg.contains("direct: HTTP 403"));
        assert!(msg.contains("relay: HTTP 502"));
        assert_eq!(err.last_status(), Some(502));
    }

    #[test]
    fn fetch_error_without_relay() {
        let err = FetchError {
            url: "https://ex.test/".to_string(),
            direct: AttemptError::Status(404),
            relay: None,
        };
        assert!(!err.to_string().contains("relay"));
        assert_eq!(err.last_status(), Some(404));
    }

    #[test]
    fn invalid_url_error_keeps_input() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = CaptureError::InvalidUrl {
            input: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().contains("\"not a url\""));
    }
}
