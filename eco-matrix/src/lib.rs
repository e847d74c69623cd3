//! Emissions matrix builder.
//!
//! Compares train, car and plane between pairs of cities using the
//! EcoPassenger journey comparison service: CO2 emissions, energy use and
//! travel time for each mode, scraped from the service's result pages.

pub mod cities;
pub mod comparison;
pub mod domain;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod stations;
