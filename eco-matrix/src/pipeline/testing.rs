//! In-memory stand-ins for the remote service.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::comparison::{ComparisonQuery, FetchError};
use crate::domain::{Coordinates, StationRef};
use crate::stations::ResolutionError;

use super::source::{ComparisonSource, StationLookup};

pub const FIXTURE: &str = include_str!("../../data/fixtures/paris_berlin.html");
pub const UNAVAILABLE: &str = include_str!("../../data/fixtures/unavailable.html");

/// Stations known by city name; anything else has no suggestions.
pub struct MockStations {
    stations: HashMap<String, StationRef>,
}

impl MockStations {
    pub fn europe() -> Self {
        let known = [
            ("Paris", "Paris", 48.856614, 2.351492),
            ("Berlin", "Berlin Hbf", 52.525592, 13.369545),
            ("Rome", "Roma Termini", 41.901, 12.500),
            ("Vienna", "Wien Hbf", 48.185, 16.376),
            ("Lhasa", "Lhasa", 29.652, 91.172),
        ];

        let stations = known
            .into_iter()
            .map(|(city, name, lat, lon)| {
                let station = StationRef::new(
                    format!("A=1@O={name}@"),
                    name,
                    Some(Coordinates::new(lat, lon)),
                );
                (city.to_string(), station)
            })
            .collect();

        Self { stations }
    }
}

impl StationLookup for MockStations {
    async fn resolve(&self, city: &str) -> Result<StationRef, ResolutionError> {
        self.stations
            .get(city)
            .cloned()
            .ok_or_else(|| ResolutionError::MalformedResponse("no suggestions".to_string()))
    }
}

/// Serves one canned page (or status) and records what was asked for.
pub struct MockComparisons {
    page: Result<&'static str, u16>,
    queries: Mutex<Vec<(String, String)>>,
}

impl MockComparisons {
    pub fn serving(page: &'static str) -> Self {
        Self {
            page: Ok(page),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            page: Err(status),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Station ids of every query made, in order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

impl ComparisonSource for MockComparisons {
    async fn fetch(&self, query: &ComparisonQuery<'_>) -> Result<String, FetchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.origin.id.clone(), query.destination.id.clone()));
        tokio::task::yield_now().await;
        self.page
            .map(str::to_string)
            .map_err(FetchError::HttpStatus)
    }
}
