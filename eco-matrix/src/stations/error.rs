//! Station search error types.

use std::sync::Arc;

use crate::domain::InvalidCoordinate;

/// Errors that can occur when resolving a city name to a station.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Search endpoint returned a non-success status
    #[error("station search returned status {0}")]
    HttpStatus(u16),

    /// No JSON object could be recovered, or it had no suggestions
    #[error("malformed suggestion payload: {0}")]
    MalformedResponse(String),

    /// A coordinate field could not be decoded
    #[error("bad coordinate encoding: {0}")]
    BadCoordinateEncoding(#[from] InvalidCoordinate),
    /// A concurrent lookup of the same city failed with this error
    #[error(transparent)]
    Shared(Arc<ResolutionError>),
}
