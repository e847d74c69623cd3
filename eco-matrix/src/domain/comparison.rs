//! Per-mode comparison records.

use std::fmt;

use serde::Serialize;

use super::station::StationRef;

/// Value recorded for a flight figure when the service gives no separate
/// airport-access and flight legs to add up.
pub const FLIGHT_SENTINEL: f64 = -1.0;

/// Duration recorded alongside [`FLIGHT_SENTINEL`].
pub const FLIGHT_SENTINEL_DURATION: i64 = -1;

/// A transport alternative offered by the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
    Car,
    Flight,
}

impl Mode {
    /// All modes in the order the service lays out its columns.
    pub const ALL: [Mode; 3] = [Mode::Train, Mode::Car, Mode::Flight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Train => "train",
            Mode::Car => "car",
            Mode::Flight => "flight",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Figures extracted for one mode.
///
/// Every field is `None` until the extractor finds a value for it. The only
/// non-parsed value ever stored is the flight sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeMetrics {
    /// CO2 emissions in kg.
    pub co2: Option<f64>,

    /// Primary energy consumption in litres of petrol equivalent.
    pub energy_consumption: Option<f64>,

    /// Products (train categories, vehicle types) used by the mode.
    pub products: Option<Vec<String>>,

    /// Door-to-door travel time.
    pub duration_seconds: Option<i64>,
}

impl ModeMetrics {
    /// True when nothing at all was extracted for this mode.
    pub fn is_absent(&self) -> bool {
        self.co2.is_none()
            && self.energy_consumption.is_none()
            && self.products.is_none()
            && self.duration_seconds.is_none()
    }

    /// True when the CO2 figure is the flight sentinel.
    pub fn has_sentinel_co2(&self) -> bool {
        self.co2 == Some(FLIGHT_SENTINEL)
    }
}

/// Metrics for all three modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeSet {
    pub train: ModeMetrics,
    pub car: ModeMetrics,
    pub flight: ModeMetrics,
}

impl ModeSet {
    pub fn get(&self, mode: Mode) -> &ModeMetrics {
        match mode {
            Mode::Train => &self.train,
            Mode::Car => &self.car,
            Mode::Flight => &self.flight,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut ModeMetrics {
        match mode {
            Mode::Train => &mut self.train,
            Mode::Car => &mut self.car,
            Mode::Flight => &mut self.flight,
        }
    }

    pub fn is_absent(&self) -> bool {
        Mode::ALL.iter().all(|m| self.get(*m).is_absent())
    }
}

/// Build the identifier of a city pair from the input city names.
pub fn pair_id(origin: &str, destination: &str) -> String {
    format!("{origin} to {destination}")
}

/// The comparison for one city pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// `"<origin> to <destination>"`, using the names as given by the caller.
    pub id: String,
    pub origin_city: String,
    pub destination_city: String,
    pub origin: StationRef,
    pub destination: StationRef,
    pub modes: ModeSet,
}

impl ComparisonResult {
    pub fn new(
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
        origin: StationRef,
        destination: StationRef,
        modes: ModeSet,
    ) -> Self {
        let origin_city = origin_city.into();
        let destination_city = destination_city.into();
        Self {
            id: pair_id(&origin_city, &destination_city),
            origin_city,
            destination_city,
            origin,
            destination,
            modes,
        }
    }

    /// True when the service reported no data for this pair.
    pub fn is_unavailable(&self) -> bool {
        self.modes.is_absent()
    }
}
