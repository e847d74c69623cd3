//! Seams between the pipeline and the remote service.

use crate::comparison::{ComparisonQuery, FetchError};
use crate::domain::StationRef;
use crate::stations::ResolutionError;

/// Trait for resolving city names to stations.
///
/// This abstraction allows the pipeline to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait StationLookup {
    /// Resolve a city name to the first station the service suggests.
    async fn resolve(&self, city: &str) -> Result<StationRef, ResolutionError>;
}

/// Trait for fetching comparison pages.
#[allow(async_fn_in_trait)]
pub trait ComparisonSource {
    /// Fetch the raw comparison page for a query.
    async fn fetch(&self, query: &ComparisonQuery<'_>) -> Result<String, FetchError>;
}
