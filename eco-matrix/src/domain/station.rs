//! Resolved station references.

use std::fmt;

use serde::Serialize;

/// Number of implied fractional digits in a fixed-point coordinate.
const COORD_FRACTION_DIGITS: usize = 6;

/// Error returned when decoding a fixed-point coordinate string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate {raw:?}: {reason}")]
pub struct InvalidCoordinate {
    raw: String,
    reason: &'static str,
}

impl InvalidCoordinate {
    fn new(raw: &str, reason: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Decode a fixed-point coordinate with six implied decimal places.
///
/// Everything except the last six characters is the integer part and the
/// last six characters are the fraction. The split is purely textual, so a
/// leading sign stays with the integer part.
///
/// # Examples
///
/// ```
/// use eco_matrix::domain::decode_coord;
///
/// assert_eq!(decode_coord("47123456").unwrap(), 47.123456);
/// assert_eq!(decode_coord("-1234567").unwrap(), -1.234567);
/// assert!(decode_coord("12345").is_err());
/// ```
pub fn decode_coord(raw: &str) -> Result<f64, InvalidCoordinate> {
    let chars = raw.chars().count();
    if chars < COORD_FRACTION_DIGITS {
        return Err(InvalidCoordinate::new(raw, "fewer than 6 characters"));
    }

    let split = raw
        .char_indices()
        .nth(chars - COORD_FRACTION_DIGITS)
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    let (integer, fraction) = raw.split_at(split);

    // "123456" and "-123456" have no integer digits left after the split
    let integer = match integer {
        "" => "0",
        "-" => "-0",
        "+" => "+0",
        other => other,
    };

    format!("{integer}.{fraction}")
        .parse()
        .map_err(|_| InvalidCoordinate::new(raw, "not a decimal number"))
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// A station as identified by the comparison service.
///
/// Built from the first suggestion the station search returns for a city
/// name. The `id` is opaque and is passed back verbatim when querying.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRef {
    /// The service's internal station identifier.
    pub id: String,

    /// Canonical name as reported by the service.
    pub display_name: String,

    /// Position of the station, `None` if the service did not report one.
    pub coordinates: Option<Coordinates>,
}

impl StationRef {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            coordinates,
        }
    }
}
