//! HTTP GET of a source's subscription list.
//!
//! Uses the curl crate (libcurl). One attempt per call, no retries; failures
//! are logged and folded into `FetchResult` instead of being returned as errors.

mod error;

pub use error::FetchError;

use std::time::Duration;

use crate::source::Source;

/// Upper bound for the TCP/TLS connect phase.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("subsync/", env!("CARGO_PKG_VERSION"));
/// Largest body `get_text` accepts. Subscription lists are far smaller.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Outcome of one fetch attempt. Consumed by the filter right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub source_key: String,
    /// Trimmed body; `Some` iff `succeeded`.
    pub raw_body: Option<String>,
    pub succeeded: bool,
    /// Human-readable reason when `succeeded` is false.
    pub error: Option<String>,
}

impl FetchResult {
    pub fn ok(source_key: &str, body: String) -> Self {
        Self {
            source_key: source_key.to_string(),
            raw_body: Some(body),
            succeeded: true,
            error: None,
        }
    }

    pub fn failed(source_key: &str, reason: impl ToString) -> Self {
        Self {
            source_key: source_key.to_string(),
            raw_body: None,
            succeeded: false,
            error: Some(reason.to_string()),
        }
    }
}

/// Network collaborator of the pipeline. Implementations must never panic on
/// transport errors; they report them through `FetchResult`.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, source: &Source) -> FetchResult;
}

/// Production fetcher backed by libcurl. Blocking; the scheduler runs it on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlFetcher;

impl Fetcher for CurlFetcher {
    fn fetch(&self, source: &Source) -> FetchResult {
        tracing::info!(source = %source.key, url = %source.url, "fetching subscription list");
        match get_text(&source.url, source.timeout) {
            Ok(body) => {
                tracing::info!(
                    source = %source.key,
                    chars = body.chars().count(),
                    lines = body.lines().count(),
                    "fetched subscription list"
                );
                FetchResult::ok(&source.key, body)
            }
            Err(e) => {
                tracing::warn!(source = %source.key, url = %source.url, error = %e, "fetch failed");
                FetchResult::failed(&source.key, e)
            }
        }
    }
}

/// GET `url` and return the body as trimmed text.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn get_text(url: &str, timeout: Duration) -> Result<String, FetchError> {
    get_text_limited(url, timeout, MAX_BODY_BYTES)
}

/// `get_text` with an explicit body size cap; a larger body aborts the transfer.
pub fn get_text_limited(
    url: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut too_large = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::from_curl)?;
    easy.get(true).map_err(FetchError::from_curl)?;
    easy.follow_location(true).map_err(FetchError::from_curl)?;
    easy.max_redirections(10).map_err(FetchError::from_curl)?;
    easy.useragent(USER_AGENT).map_err(FetchError::from_curl)?;
    // Empty string = accept every encoding libcurl was built with.
    easy.accept_encoding("").map_err(FetchError::from_curl)?;
    easy.connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .map_err(FetchError::from_curl)?;
    easy.timeout(timeout).map_err(FetchError::from_curl)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                if body.len() + data.len() > max_bytes {
                    too_large = true;
                    // Short write: libcurl aborts with a write error.
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::from_curl)?;
        let performed = transfer.perform();
        drop(transfer);
        if too_large {
            return Err(FetchError::TooLarge(max_bytes));
        }
        performed.map_err(FetchError::from_curl)?;
    }

    let code = easy.response_code().map_err(FetchError::from_curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let text = String::from_utf8_lossy(&body).trim().to_string();
    if text.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    Ok(text)
}
