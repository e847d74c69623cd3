//! CSV output of the emissions matrix.

use std::io::Write;
use std::path::Path;

use crate::domain::{ComparisonResult, Coordinates, Mode, ModeMetrics, to_text};

/// Placeholder written for absent values.
pub const MISSING: &str = "N/A";

/// Column headers, in output order.
pub const HEADER: [&str; 17] = [
    "ID",
    "Departure City",
    "Arrival City",
    "Departure Coordinates",
    "Arrival Coordinates",
    "Train CO2",
    "Train Energy Resource Consumption",
    "Train Products",
    "Train Duration",
    "Car CO2",
    "Car Energy Resource Consumption",
    "Car Products",
    "Car Duration",
    "Flight CO2",
    "Flight Energy Resource Consumption",
    "Flight Products",
    "Flight Duration",
];

/// Errors writing the matrix.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes one CSV row per compared pair.
pub struct MatrixWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl MatrixWriter<std::fs::File> {
    /// Create (or truncate) a CSV file and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        Self::with_writer(csv::Writer::from_path(path)?)
    }
}

impl<W: Write> MatrixWriter<W> {
    /// Wrap any writer and write the header.
    pub fn from_writer(inner: W) -> Result<Self, OutputError> {
        Self::with_writer(csv::Writer::from_writer(inner))
    }

    fn with_writer(mut writer: csv::Writer<W>) -> Result<Self, OutputError> {
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Write a row for `result`.
    ///
    /// Pairs without a train CO2 figure (including every pair the service
    /// had no data for) are skipped. Returns whether a row was written.
    pub fn write_result(&mut self, result: &ComparisonResult) -> Result<bool, OutputError> {
        if result.modes.train.co2.is_none() {
            return Ok(false);
        }
        self.writer.write_record(record(result))?;
        self.rows += 1;
        Ok(true)
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

fn record(result: &ComparisonResult) -> Vec<String> {
    let mut fields = vec![
        result.id.clone(),
        result.origin_city.clone(),
        result.destination_city.clone(),
        coordinates(result.origin.coordinates),
        coordinates(result.destination.coordinates),
    ];
    for mode in Mode::ALL {
        fields.extend(mode_fields(result.modes.get(mode)));
    }
    fields
}

fn mode_fields(metrics: &ModeMetrics) -> [String; 4] {
    [
        number(metrics.co2),
        number(metrics.energy_consumption),
        metrics
            .products
            .as_ref()
            .map_or_else(|| MISSING.to_string(), |p| p.join(", ")),
        duration(metrics.duration_seconds),
    ]
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Durations as "HH:MM"; the flight sentinel is written as is.
fn duration(seconds: Option<i64>) -> String {
    match seconds {
        None => MISSING.to_string(),
        Some(s) if s < 0 => s.to_string(),
        Some(s) => to_text(s as u64),
    }
}

fn coordinates(coords: Option<Coordinates>) -> String {
    coords.map_or_else(|| MISSING.to_string(), |c| c.to_string())
}
