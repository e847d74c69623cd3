//! Extraction error types.

/// Errors from parsing a comparison page.
///
/// Missing figures are not errors; they stay `None` in the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// Content is not markup at all
    #[error("content is not HTML: {0}")]
    Unparseable(&'static str),
}
