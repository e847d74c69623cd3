//! The per-pair pipeline and the matrix run over all pairs.
//!
//! For each pair: resolve both cities, fetch the comparison page, extract
//! the figures. The remote service is reached through [`StationLookup`] and
//! [`ComparisonSource`] so the pipeline can run against canned data.

mod matrix;
mod pair;
mod pairs;
mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use matrix::{CancelFlag, MatrixConfig, MatrixReport, PairFailure, run_matrix};
pub use pair::{PairError, PairOutcome, Pipeline};
pub use pairs::{CityPair, PairOrder, city_pairs};
pub use source::{ComparisonSource, StationLookup};
