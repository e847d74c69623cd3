//! Comparison fetch error types.

/// Errors from the comparison HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Comparison endpoint returned a status other than 200
    #[error("comparison endpoint returned status {0}")]
    HttpStatus(u16),

    /// Concurrency limiter was shut down
    #[error("request limiter closed")]
    LimiterClosed,
}

impl FetchError {
    /// Whether another attempt might succeed.
    ///
    /// Only transport failures are retried; a status code is an answer.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}
