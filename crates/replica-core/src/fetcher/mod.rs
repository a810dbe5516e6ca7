//! Resource retrieval with a single relay fallback.
//!
//! [`CurlFetcher`] tries a direct GET first. If that attempt fails at the
//! transport level or returns a non-2xx status, it retries exactly once through
//! a fixed relay endpoint that receives the target URL as a query parameter.
//! There is no further retry.

mod get;
mod relay;

pub use get::CurlOptions;
pub use relay::relay_url;

use crate::config::ReplicaConfig;
use crate::error::{AttemptError, FetchError};

/// A successfully retrieved resource (2xx status).
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
    /// `Content-Type` header of the final response, if present.
    pub content_type: Option<String>,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can retrieve a URL's bytes. The pipeline only depends on this trait.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(url)
    }
}

/// Relay endpoint and the query parameter that carries the target URL.
#[derive(Debug, Clone)]
pub struct Relay {
    pub endpoint: String,
    pub query_param: String,
}

/// libcurl-backed fetcher: direct GET, then at most one relay GET.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    curl: CurlOptions,
    relay: Option<Relay>,
}

impl CurlFetcher {
    pub fn new(curl: CurlOptions, relay: Option<Relay>) -> Self {
        Self { curl, relay }
    }

    /// Builds a fetcher from the `[http]` and `[relay]` config sections.
    pub fn from_config(cfg: &ReplicaConfig) -> Self {
        let curl = CurlOptions {
            connect_timeout: cfg.http.connect_timeout(),
            timeout: cfg.http.timeout(),
            max_redirections: cfg.http.max_redirections,
            user_agent: cfg.http.user_agent.clone(),
        };
        let relay = cfg.relay.enabled.then(|| Relay {
            endpoint: cfg.relay.endpoint.clone(),
            query_param: cfg.relay.query_param.clone(),
        });
        Self::new(curl, relay)
    }

    /// Same fetcher without the relay fallback.
    pub fn without_relay(mut self) -> Self {
        self.relay = None;
        self
    }

    pub fn relay(&self) -> Option<&Relay> {
        self.relay.as_ref()
    }

    fn fetch_via_relay(&self, relay: &Relay, url: &str) -> Result<FetchResponse, AttemptError> {
        let relayed = relay_url(&relay.endpoint, &relay.query_param, url)?;
        tracing::debug!(url, relay = %relayed, "GET via relay");
        get::get(relayed.as_str(), &self.curl)
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::from_config(&ReplicaConfig::default())
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        tracing::debug!(url, "GET direct");
        let direct = match get::get(url, &self.curl) {
            Ok(resp) => {
                tracing::debug!(url, status = resp.status, "fetched directly");
                return Ok(resp);
            }
            Err(e) => e,
        };

        let Some(relay) = &self.relay else {
            return Err(FetchError {
                url: url.to_string(),
                direct,
                relay: None,
            });
        };

        tracing::warn!(url, error = %direct, "direct fetch failed, falling back to relay");
        match self.fetch_via_relay(relay, url) {
            Ok(resp) => {
                tracing::debug!(url, status = resp.status, "fetched via relay");
                Ok(resp)
            }
            Err(relay_err) => Err(FetchError {
                url: url.to_string(),
                direct,
                relay: Some(relay_err),
            }),
        }
    }
}
