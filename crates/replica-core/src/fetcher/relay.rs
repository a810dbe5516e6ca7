//! Relay (CORS-bypass proxy) URL construction.

use url::Url;

/// Builds the relay request URL: `endpoint?<param>=<form-encoded target>`.
///
/// Query pairs already present on the endpoint are kept.
pub fn relay_url(endpoint: &str, query_param: &str, target: &str) -> Result<Url, url::ParseError> {
    let mut relay = Url::parse(endpoint)?;
    relay.query_pairs_mut().append_pair(query_param, target);
    Ok(relay)
}
