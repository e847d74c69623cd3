//! In-memory cache of resolved stations.
//!
//! Every city appears in `n - 1` pairs of the matrix, so resolving each
//! name once saves most of the search traffic. Only successful lookups are
//! cached; a failed search is retried the next time the city comes up.
//! Concurrent lookups of the same city share a single search.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationRef;
use crate::pipeline::StationLookup;

use super::error::ResolutionError;

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Station lookup with caching, keyed by the city name as given.
pub struct CachedStationResolver<L> {
    inner: L,
    stations: MokaCache<String, StationRef>,
}

impl<L: StationLookup> CachedStationResolver<L> {
    /// Create a new cached resolver.
    pub fn new(inner: L, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, stations }
    }

    /// Access the wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Drop all cached stations.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
    }
}

impl<L: StationLookup> StationLookup for CachedStationResolver<L> {
    async fn resolve(&self, city: &str) -> Result<StationRef, ResolutionError> {
        self.stations
            .try_get_with(city.to_string(), async {
                trace!(city, "Station cache miss");
                self.inner.resolve(city).await
            })
            .await
            .map_err(|e| Arc::try_unwrap(e).unwrap_or_else(ResolutionError::Shared))
    }
}
