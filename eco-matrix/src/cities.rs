//! City list input.

use std::path::Path;

/// Errors reading the city list.
#[derive(Debug, thiserror::Error)]
pub enum CityListError {
    #[error("failed to read city list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("city list {0} names fewer than two cities")]
    TooFew(String),
}

/// Parse a newline-delimited city list. Lines are trimmed; blank lines are
/// dropped.
pub fn parse_cities(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a city list from a file. At least two cities are required to form
/// a pair.
pub fn read_cities(path: impl AsRef<Path>) -> Result<Vec<String>, CityListError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CityListError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let cities = parse_cities(&text);
    if cities.len() < 2 {
        return Err(CityListError::TooFew(path.display().to_string()));
    }
    Ok(cities)
}
