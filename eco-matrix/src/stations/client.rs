//! Station search client.

use tracing::debug;

use crate::domain::StationRef;
use crate::pipeline::StationLookup;

use super::error::ResolutionError;
use super::suggest::parse_first_suggestion;

/// Default URL of the station suggestion endpoint.
const DEFAULT_BASE_URL: &str = "https://ecopassenger.hafas.de/bin/ajax-getstop.exe/eny";

/// Configuration for the station search client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// URL of the suggestion endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station suggestion endpoint.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a new station search client.
    pub fn new(config: StationClientConfig) -> Result<Self, ResolutionError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Resolve a city name to the first station the service suggests.
    pub async fn search(&self, city: &str) -> Result<StationRef, ResolutionError> {
        // The trailing '?' asks the endpoint for prefix matches
        let pattern = format!("{city}?");

        let response = self
            .http
            .get(&self.base_url)
            .query(&search_params(&pattern))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let station = parse_first_suggestion(&body)?;

        debug!(city, station = %station.display_name, "Resolved station");
        Ok(station)
    }
}

impl StationLookup for StationClient {
    async fn resolve(&self, city: &str) -> Result<StationRef, ResolutionError> {
        self.search(city).await
    }
}

/// Query string for a suggestion search.
fn search_params(pattern: &str) -> [(&'static str, &str); 9] {
    [
        ("start", "1"),
        ("getattr", "1"),
        ("tpl", "suggest2json"),
        ("REQ0JourneyStopsS0A", "255"),
        ("getstop", "1"),
        ("noSession", "yes"),
        ("REQ0JourneyStopsB", ""),
        ("REQ0JourneyStopsS0G", pattern),
        ("js", "true"),
    ]
}
