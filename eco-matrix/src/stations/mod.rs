//! Station search: city name to station reference.
//!
//! The suggestion endpoint returns a ranked list of stations for a free-text
//! query. We take the first suggestion and do no disambiguation; a city name
//! that matches nothing is a [`ResolutionError`], never a silent default.

mod cache;
mod client;
mod error;
mod suggest;

pub use cache::{CacheConfig, CachedStationResolver};
pub use client::{StationClient, StationClientConfig};
pub use error::ResolutionError;
pub use suggest::{SuggestionDto, SuggestionsResponse, json_span, parse_first_suggestion};
