//! Single HTTP GET into memory.

use crate::error::AttemptError;
use std::str;
use std::time::Duration;

use super::FetchResponse;

/// Transfer settings applied to every GET.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

/// Performs one GET of `url`, following redirects, and buffers the body.
///
/// A transport failure or a non-2xx status is returned as an [`AttemptError`].
pub(crate) fn get(url: &str, opts: &CurlOptions) -> Result<FetchResponse, AttemptError> {
    let mut body: Vec<u8> = Vec::new();
    let mut content_type: Option<String> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(line) = str::from_utf8(data) {
                if let Some((name, value)) = line.trim_end().split_once(':') {
                    if name.trim().eq_ignore_ascii_case("content-type") {
                        // Last one wins: redirects emit one header block per hop.
                        content_type = Some(value.trim().to_string());
                    }
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(AttemptError::Status(status));
    }

    Ok(FetchResponse {
        status,
        body,
        content_type,
    })
}
