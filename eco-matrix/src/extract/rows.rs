//! Reading the per-mode figures out of a detail row.
//!
//! A detail row holds one metric (CO2 or energy) for every mode, laid out
//! left to right as train, car, then the flight split into its airport
//! access leg and the flight itself. How many cells the train takes depends
//! on the connection:
//!
//! - a single train leg is one plain cell;
//! - a multi-leg train shows its legs as greyed sub-lines, and the train
//!   total sits in a separate bold cell.
//!
//! When there is no flight to break down, the row ends after the car cell.

use scraper::ElementRef;

use crate::domain::{FLIGHT_SENTINEL, FLIGHT_SENTINEL_DURATION, ModeMetrics, ModeSet};

use super::text::{has_exact_classes, is_muted, parse_number, selector};

const PLAIN_CELL: [&str; 3] = ["sepline", "nowrap", "right"];
const TOTAL_CELL: [&str; 4] = ["sepline", "nowrap", "right", "bold"];

/// Which figure a detail row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Co2,
    Energy,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Co2, Metric::Energy];

    /// Row label identifying the metric.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Co2 => "Carbon dioxide",
            Metric::Energy => "Energy resource consumption",
        }
    }

    fn slot<'m>(&self, metrics: &'m mut ModeMetrics) -> &'m mut Option<f64> {
        match self {
            Metric::Co2 => &mut metrics.co2,
            Metric::Energy => &mut metrics.energy_consumption,
        }
    }
}

/// The flight column of a detail row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightFigure {
    /// The row ended after the car cell.
    NotBrokenDown,
    /// Access leg plus flight leg, `None` if either failed to parse.
    Combined(Option<f64>),
}

/// Figures read from one detail row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFigures {
    pub train: Option<f64>,
    pub car: Option<f64>,
    pub flight: FlightFigure,
}

/// Read a detail row. Returns `None` if the row has no plain figure cells.
pub fn read_row(row: &ElementRef<'_>) -> Option<RowFigures> {
    let td = selector("td");
    let cells: Vec<ElementRef<'_>> = row.select(&td).collect();

    let plain: Vec<&ElementRef<'_>> = cells
        .iter()
        .filter(|c| has_exact_classes(c, &PLAIN_CELL))
        .collect();
    let first = plain.first()?;

    let (train, mut idx) = if is_muted(first) {
        // Greyed sub-lines: the bold total is the train figure
        let total = cells
            .iter()
            .find(|c| has_exact_classes(c, &TOTAL_CELL))
            .and_then(|c| cell_number(c));
        (total, 2)
    } else {
        (cell_number(first), 1)
    };

    let car = plain.get(idx).and_then(|c| cell_number(c));
    idx += 1;

    let flight = if idx >= plain.len() {
        FlightFigure::NotBrokenDown
    } else {
        let access = plain.get(idx).and_then(|c| cell_number(c));
        let leg = plain.get(idx + 1).and_then(|c| cell_number(c));
        FlightFigure::Combined(access.zip(leg).map(|(a, b)| a + b))
    };

    Some(RowFigures { train, car, flight })
}

/// Store a row's figures into the mode set.
///
/// A row without a flight breakdown marks the flight figure and duration
/// with the sentinel; a later duration cell may still overwrite the latter.
pub fn apply_row(modes: &mut ModeSet, metric: Metric, figures: RowFigures) {
    *metric.slot(&mut modes.train) = figures.train;
    *metric.slot(&mut modes.car) = figures.car;

    match figures.flight {
        FlightFigure::NotBrokenDown => {
            *metric.slot(&mut modes.flight) = Some(FLIGHT_SENTINEL);
            modes.flight.duration_seconds = Some(FLIGHT_SENTINEL_DURATION);
        }
        FlightFigure::Combined(value) => {
            *metric.slot(&mut modes.flight) = value;
        }
    }
}

fn cell_number(cell: &ElementRef<'_>) -> Option<f64> {
    parse_number(&cell.text().collect::<String>())
}
