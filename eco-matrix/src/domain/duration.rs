//! Travel duration codec.
//!
//! The comparison service reports durations as "HH:MM" strings. Hours are
//! not bounded to a day: a long car journey may well read "27:45".

/// Error returned when parsing an invalid duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct DurationError {
    reason: &'static str,
}

impl DurationError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse an "HH:MM" duration into seconds.
///
/// # Examples
///
/// ```
/// use eco_matrix::domain::to_seconds;
///
/// assert_eq!(to_seconds("08:14").unwrap(), 8 * 3600 + 14 * 60);
/// assert_eq!(to_seconds("27:05").unwrap(), 27 * 3600 + 5 * 60);
/// assert!(to_seconds("0814").is_err());
/// ```
pub fn to_seconds(text: &str) -> Result<u64, DurationError> {
    let (hours, minutes) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| DurationError::new("expected HH:MM format"))?;

    let hours = parse_component(hours).ok_or_else(|| DurationError::new("invalid hour digits"))?;
    let minutes =
        parse_component(minutes).ok_or_else(|| DurationError::new("invalid minute digits"))?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .ok_or_else(|| DurationError::new("duration out of range"))
}

/// Format seconds as "HH:MM", truncating to whole minutes.
///
/// # Examples
///
/// ```
/// use eco_matrix::domain::to_text;
///
/// assert_eq!(to_text(29_640), "08:14");
/// assert_eq!(to_text(59), "00:00");
/// assert_eq!(to_text(100 * 3600), "100:00");
/// ```
pub fn to_text(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
