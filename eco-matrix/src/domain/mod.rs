//! Domain types for the emissions matrix.
//!
//! Plain value objects: stations as resolved by the search endpoint, the
//! per-mode figures extracted from a comparison, and the "HH:MM" duration
//! codec shared by the extractor and the CSV output.

mod comparison;
mod duration;
mod station;

pub use comparison::{
    ComparisonResult, FLIGHT_SENTINEL, FLIGHT_SENTINEL_DURATION, Mode, ModeMetrics, ModeSet,
    pair_id,
};
pub use duration::{DurationError, to_seconds, to_text};
pub use station::{Coordinates, InvalidCoordinate, StationRef, decode_coord};
