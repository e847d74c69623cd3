//! Text and attribute helpers for the comparison markup.

use scraper::{ElementRef, Selector};

/// Compile a selector known to be valid.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Collapse runs of whitespace (including non-breaking spaces) and trim.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element.
pub fn element_text(el: &ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

/// Parse a figure written with a comma as decimal separator.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = normalize(text).replace(',', ".");
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

/// Whether the element's class attribute is exactly `classes`, in order.
///
/// The cells we care about differ only by a trailing class ("bold"), so a
/// CSS class selector alone would match both kinds.
pub fn has_exact_classes(el: &ElementRef<'_>, classes: &[&str]) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|attr| attr.split_whitespace().eq(classes.iter().copied()))
}

/// Whether an inline style greys the text out (`color:#888`).
pub fn is_muted(el: &ElementRef<'_>) -> bool {
    el.value().attr("style").is_some_and(|style| {
        style
            .split(';')
            .map(|decl| decl.split_whitespace().collect::<String>().to_ascii_lowercase())
            .any(|decl| decl == "color:#888" || decl == "color:#888888")
    })
}
