//! City pair generation.

use std::fmt;

use crate::domain::pair_id;

/// Whether (A, B) and (B, A) are both compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairOrder {
    /// Each combination once, earlier city first.
    #[default]
    Unordered,
    /// Both directions of every combination.
    Ordered,
}

/// An origin and destination city, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityPair {
    pub origin: String,
    pub destination: String,
}

impl CityPair {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    pub fn id(&self) -> String {
        pair_id(&self.origin, &self.destination)
    }
}

impl fmt::Display for CityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.origin, self.destination)
    }
}

/// Build the pairs to compare, in input order.
///
/// `Unordered` yields `(cities[i], cities[j])` for every `i < j`;
/// `Ordered` additionally yields the reverse of each.
pub fn city_pairs(cities: &[String], order: PairOrder) -> Vec<CityPair> {
    let mut pairs = Vec::new();
    for (i, origin) in cities.iter().enumerate() {
        for (j, destination) in cities.iter().enumerate() {
            let wanted = match order {
                PairOrder::Unordered => i < j,
                PairOrder::Ordered => i != j,
            };
            if wanted {
                pairs.push(CityPair::new(origin.as_str(), destination.as_str()));
            }
        }
    }
    pairs
}
