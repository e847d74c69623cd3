//! Comparison endpoint client.
//!
//! Posts a query for two resolved stations and returns the raw HTML of the
//! result page. Parsing lives in [`crate::extract`].

mod client;
mod error;
mod query;

pub use client::{ComparisonClient, ComparisonConfig};
pub use error::FetchError;
pub use query::{ComparisonQuery, TravelSchedule};
