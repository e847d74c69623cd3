//! Comparison HTTP client.
//!
//! Submits the comparison form and returns the HTML page. Limits concurrent
//! requests with a semaphore and retries transport failures with
//! exponential backoff.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::pipeline::ComparisonSource;

use super::error::FetchError;
use super::query::ComparisonQuery;

/// Default comparison endpoint.
const DEFAULT_ENDPOINT: &str =
    "https://ecopassenger.hafas.de/bin/query.exe/en?ld=uic-eco&L=vs_uic&protocol=https:&OK";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for the comparison client.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// URL the comparison form is posted to
    pub endpoint: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a transport failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further retry
    pub initial_backoff: Duration,
}

impl ComparisonConfig {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 60,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(500),
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the initial retry delay.
    pub fn with_initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self
    }

    /// Delay before retry number `attempt` (starting at 1).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the comparison endpoint.
#[derive(Debug, Clone)]
pub struct ComparisonClient {
    http: reqwest::Client,
    config: ComparisonConfig,
    semaphore: Arc<Semaphore>,
}

impl ComparisonClient {
    /// Create a new comparison client with the given configuration.
    pub fn new(config: ComparisonConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            config,
        })
    }

    /// The underlying HTTP client, for follow-up downloads.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch the comparison page, retrying transport failures.
    pub async fn fetch(&self, query: &ComparisonQuery<'_>) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(query).await {
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.backoff(attempt);
                    warn!(
                        origin = %query.origin.display_name,
                        destination = %query.destination.display_name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Comparison request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    async fn fetch_once(&self, query: &ComparisonQuery<'_>) -> Result<String, FetchError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FetchError::LimiterClosed)?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .form(&query.form_fields())
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched comparison page");
        Ok(body)
    }
}

impl ComparisonSource for ComparisonClient {
    async fn fetch(&self, query: &ComparisonQuery<'_>) -> Result<String, FetchError> {
        ComparisonClient::fetch(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ComparisonConfig::new()
            .with_endpoint("http://localhost:8080/query")
            .with_max_concurrent(10)
            .with_timeout(5)
            .with_max_retries(0)
            .with_initial_backoff(Duration::from_millis(10));

        assert_eq!(config.endpoint, "http://localhost:8080/query");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
    }

    #[test]
    fn config_defaults() {
        let config = ComparisonConfig::new();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn backoff_doubles() {
        let config = ComparisonConfig::new().with_initial_backoff(Duration::from_millis(100));

        assert_eq!(config.backoff(1), Duration::from_millis(100));
        assert_eq!(config.backoff(2), Duration::from_millis(200));
        assert_eq!(config.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn client_creation() {
        let client = ComparisonClient::new(ComparisonConfig::new());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        use crate::comparison::TravelSchedule;
        use crate::domain::StationRef;

        // Port 9 (discard) on localhost is closed in test environments
        let config = ComparisonConfig::new()
            .with_endpoint("http://127.0.0.1:9/query")
            .with_max_retries(1)
            .with_initial_backoff(Duration::from_millis(1));
        let client = ComparisonClient::new(config).unwrap();

        let a = StationRef::new("A", "A", None);
        let b = StationRef::new("B", "B", None);
        let query = ComparisonQuery::new(&a, &b, TravelSchedule::default());

        let err = client.fetch(&query).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
