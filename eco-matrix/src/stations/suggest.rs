//! Suggestion payload parsing.
//!
//! The search endpoint answers with a JavaScript snippet along the lines of
//! `SLs.sls={"suggestions":[...]};SLs.showSuggestion();`. Only the span from
//! the first `{` to the last `}` is handed to the JSON parser; nothing else
//! in the body is interpreted.

use serde::Deserialize;

use crate::domain::{Coordinates, StationRef, decode_coord};

use super::error::ResolutionError;

/// Wrapper object embedded in the search response.
#[derive(Debug, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<SuggestionDto>,
}

/// One search suggestion. Only the fields we use are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionDto {
    pub id: String,
    pub value: String,
    /// Longitude, fixed-point with six implied decimals.
    #[serde(default)]
    pub xcoord: Option<String>,
    /// Latitude, fixed-point with six implied decimals.
    #[serde(default)]
    pub ycoord: Option<String>,
}

/// Cut the outermost `{ ... }` span out of a response body.
pub fn json_span(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start < end).then(|| &body[start..=end])
}

/// Parse a search response body into the first suggested station.
pub fn parse_first_suggestion(body: &str) -> Result<StationRef, ResolutionError> {
    let json = json_span(body).ok_or_else(|| {
        ResolutionError::MalformedResponse("no JSON object in response".to_string())
    })?;

    let response: SuggestionsResponse = serde_json::from_str(json)
        .map_err(|e| ResolutionError::MalformedResponse(e.to_string()))?;

    let first = response
        .suggestions
        .into_iter()
        .next()
        .ok_or_else(|| ResolutionError::MalformedResponse("no suggestions".to_string()))?;

    to_station(first)
}

fn to_station(dto: SuggestionDto) -> Result<StationRef, ResolutionError> {
    let coordinates = match (dto.ycoord.as_deref(), dto.xcoord.as_deref()) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(decode_coord(lat)?, decode_coord(lon)?)),
        _ => None,
    };
    Ok(StationRef::new(dto.id, dto.value, coordinates))
}
