//! Fetch error type.

/// Why a single GET did not yield usable text.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (connection, DNS, TLS, invalid URL, ...).
    #[error("{0}")]
    Transfer(curl::Error),
    /// The configured timeout elapsed before the transfer completed.
    #[error("timed out")]
    TimedOut,
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// 2xx response whose body is empty after trimming.
    #[error("empty response body")]
    EmptyBody,
    /// Body exceeded the size cap (bytes); the transfer was aborted.
    #[error("response body larger than {0} bytes")]
    TooLarge(usize),
}

impl FetchError {
    /// Classify a curl error; timeouts get their own variant.
    pub fn from_curl(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            FetchError::TimedOut
        } else {
            FetchError::Transfer(e)
        }
    }
}
