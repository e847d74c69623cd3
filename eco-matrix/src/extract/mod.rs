//! Comparison page extraction.
//!
//! The comparison page is built for people, not programs: figures are
//! identified by where they sit and how they are styled rather than by
//! labels. Every assumption about that layout is kept in this module.

mod error;
mod extractor;
mod rows;
mod text;

pub use error::ExtractionError;
pub use extractor::{Extraction, ResultExtractor, UNAVAILABLE_PHRASE, extract};
pub use rows::{FlightFigure, Metric, RowFigures};
