//! Comparison page extractor.

use scraper::{ElementRef, Html};
use tracing::{debug, trace};
use url::Url;

use crate::domain::{ComparisonResult, Mode, ModeSet, StationRef, pair_id, to_seconds};

use super::error::ExtractionError;
use super::rows::{Metric, apply_row, read_row};
use super::text::{element_text, has_exact_classes, normalize, selector};

/// Phrase the service shows instead of a comparison.
pub const UNAVAILABLE_PHRASE: &str = "This information is not available.";

/// Origin the service's relative links resolve against.
const DEFAULT_BASE_ORIGIN: &str = "https://ecopassenger.hafas.de";

const DURATION_CELL: [&str; 3] = ["sepline", "borderright", "top"];

/// What was read from one comparison page.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// `"<origin> to <destination>"` from the input city names.
    pub id: String,
    pub origin_city: String,
    pub destination_city: String,
    pub modes: ModeSet,
    /// Link to the route's KML file, if the page offers one.
    pub artifact_url: Option<Url>,
}

impl Extraction {
    /// Attach the resolved stations to produce the final record.
    pub fn into_result(self, origin: StationRef, destination: StationRef) -> ComparisonResult {
        ComparisonResult::new(
            self.origin_city,
            self.destination_city,
            origin,
            destination,
            self.modes,
        )
    }
}

/// Parses comparison pages into per-mode figures.
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    base_origin: Url,
}

impl ResultExtractor {
    pub fn new(base_origin: Url) -> Self {
        Self { base_origin }
    }

    /// Extract the figures for a city pair from a comparison page.
    ///
    /// Missing figures are left as `None`. Fails only when `content` is not
    /// markup at all.
    pub fn extract(
        &self,
        origin: &str,
        destination: &str,
        content: &str,
    ) -> Result<Extraction, ExtractionError> {
        if content.trim().is_empty() {
            return Err(ExtractionError::Unparseable("empty body"));
        }
        if !content.contains('<') {
            return Err(ExtractionError::Unparseable("no markup in body"));
        }

        let document = Html::parse_document(content);
        let id = pair_id(origin, destination);

        let mut extraction = Extraction {
            id,
            origin_city: origin.to_string(),
            destination_city: destination.to_string(),
            modes: ModeSet::default(),
            artifact_url: None,
        };

        if is_unavailable(&document) {
            debug!(pair = %extraction.id, "Service has no comparison for pair");
            return Ok(extraction);
        }

        extraction.artifact_url = self.artifact_url(&document);
        read_products(&document, &mut extraction.modes);
        read_metric_rows(&document, &mut extraction.modes);
        read_durations(&document, &mut extraction.modes);

        trace!(pair = %extraction.id, modes = ?extraction.modes, "Extracted comparison");
        Ok(extraction)
    }

    /// The link wrapped around the globe icon, resolved to an absolute URL.
    fn artifact_url(&self, document: &Html) -> Option<Url> {
        let globe = selector("i.fa.fa-globe");
        let icon = document.select(&globe).next()?;
        let link = icon.parent().and_then(ElementRef::wrap)?;
        let href = link.value().attr("href")?;
        self.base_origin.join(href.trim()).ok()
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        let base_origin = Url::parse(DEFAULT_BASE_ORIGIN)
            .unwrap_or_else(|e| panic!("invalid default origin: {e}"));
        Self::new(base_origin)
    }
}

/// Extract with the default base origin.
pub fn extract(
    origin: &str,
    destination: &str,
    content: &str,
) -> Result<Extraction, ExtractionError> {
    ResultExtractor::default().extract(origin, destination, content)
}

fn is_unavailable(document: &Html) -> bool {
    element_text(&document.root_element()).contains(UNAVAILABLE_PHRASE)
}

/// "Products" headers, in train, car, flight order. The value is the text
/// following the header inside the same cell.
fn read_products(document: &Html, modes: &mut ModeSet) {
    let header = selector("div.lc_th");
    let headers = document
        .select(&header)
        .filter(|h| element_text(h) == "Products");

    for (mode, header) in Mode::ALL.into_iter().zip(headers) {
        let value = header
            .next_siblings()
            .filter_map(|node| node.value().as_text().map(|t| normalize(t)))
            .find(|text| !text.is_empty());

        modes.get_mut(mode).products =
            value.map(|v| v.split(", ").map(str::to_string).collect());
    }
}

fn read_metric_rows(document: &Html, modes: &mut ModeSet) {
    let detail_row = selector("tr.lc_hide");

    for row in document.select(&detail_row) {
        let text = element_text(&row);
        for metric in Metric::ALL {
            if !text.contains(metric.label()) {
                continue;
            }
            if let Some(figures) = read_row(&row) {
                apply_row(modes, metric, figures);
            }
        }
    }
}

/// Duration cells carry no mode label; the first three are train, car and
/// flight in that order.
fn read_durations(document: &Html, modes: &mut ModeSet) {
    let td = selector("td");
    let cells = document
        .select(&td)
        .filter(|c| has_exact_classes(c, &DURATION_CELL))
        .filter(|c| element_text(c).contains("Duration"));

    for (mode, cell) in Mode::ALL.into_iter().zip(cells) {
        let Some(text) = last_fragment(&cell) else {
            continue;
        };
        match to_seconds(&text) {
            Ok(secs) => modes.get_mut(mode).duration_seconds = i64::try_from(secs).ok(),
            Err(e) => debug!(%mode, text = %text, error = %e, "Unreadable duration"),
        }
    }
}

/// Text of the last child node of an element.
fn last_fragment(el: &ElementRef<'_>) -> Option<String> {
    let last = el.last_child()?;
    let text = match last.value().as_text() {
        Some(t) => normalize(t),
        None => ElementRef::wrap(last).map(|e| element_text(&e))?,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FLIGHT_SENTINEL;

    fn page(body: &str) -> String {
        format!("<!DOCTYPE html><html><head><title>EcoPassenger</title></head><body>{body}</body></html>")
    }

    const PRODUCTS: &str = r#"<table>
        <tr><td class="sepline borderright top"><div class="lc_th">Products</div>ICE, RE</td></tr>
        <tr><td class="sepline borderright top"><div class="lc_th">Products</div>Car</td></tr>
        </table>"#;

    #[test]
    fn rejects_non_markup() {
        assert_eq!(
            extract("A", "B", "   "),
            Err(ExtractionError::Unparseable("empty body"))
        );
        assert_eq!(
            extract("A", "B", "plain text"),
            Err(ExtractionError::Unparseable("no markup in body"))
        );
    }

    #[test]
    fn unavailable_page_short_circuits() {
        let html = page(&format!(
            r#"<p>This   information is not available.</p>{PRODUCTS}
            <a href="/kml/x.kml"><i class="fa fa-globe"></i></a>"#
        ));

        let extraction = extract("Paris", "Lhasa", &html).unwrap();
        assert_eq!(extraction.id, "Paris to Lhasa");
        assert!(extraction.modes.is_absent());
        assert_eq!(extraction.artifact_url, None);
    }

    #[test]
    fn products_split_and_missing_flight_stays_absent() {
        let extraction = extract("Paris", "Berlin", &page(PRODUCTS)).unwrap();
        let modes = extraction.modes;

        assert_eq!(
            modes.train.products,
            Some(vec!["ICE".to_string(), "RE".to_string()])
        );
        assert_eq!(modes.car.products, Some(vec!["Car".to_string()]));
        assert_eq!(modes.flight.products, None);
    }

    #[test]
    fn products_header_must_match_exactly() {
        let html = page(
            r#"<div class="lc_th">Products used</div>ICE<div class="lc_th">Products</div>TGV"#,
        );
        let modes = extract("A", "B", &html).unwrap().modes;
        assert_eq!(modes.train.products, Some(vec!["TGV".to_string()]));
        assert_eq!(modes.car.products, None);
    }

    #[test]
    fn artifact_link_resolves_against_origin() {
        let html = page(
            r#"<a href="/bin/query.exe/en?ld=uic-eco&amp;kml=1"><i class="fa fa-globe"></i></a>"#,
        );
        let extraction = extract("A", "B", &html).unwrap();
        assert_eq!(
            extraction.artifact_url.unwrap().as_str(),
            "https://ecopassenger.hafas.de/bin/query.exe/en?ld=uic-eco&kml=1"
        );
    }

    #[test]
    fn custom_origin_for_artifact_link() {
        let extractor = ResultExtractor::new(Url::parse("http://localhost:8080").unwrap());
        let html = page(r#"<a href="/route.kml"><i class="fa fa-globe"></i></a>"#);
        let extraction = extractor.extract("A", "B", &html).unwrap();
        assert_eq!(
            extraction.artifact_url.unwrap().as_str(),
            "http://localhost:8080/route.kml"
        );
    }

    #[test]
    fn durations_assigned_by_position() {
        let html = page(
            r#"<table><tr>
            <td class="sepline borderright top"><span>Duration</span><br>08:14</td>
            <td class="sepline borderright top">Changes<br>2</td>
            <td class="sepline borderright top"><span>Duration</span><br>10:05</td>
            </tr></table>"#,
        );
        let modes = extract("A", "B", &html).unwrap().modes;

        assert_eq!(modes.train.duration_seconds, Some(8 * 3600 + 14 * 60));
        assert_eq!(modes.car.duration_seconds, Some(10 * 3600 + 5 * 60));
        assert_eq!(modes.flight.duration_seconds, None);
    }

    #[test]
    fn duration_cell_needs_exact_classes() {
        let html = page(
            r#"<table><tr>
            <td class="sepline borderright top bold">Duration<br>01:00</td>
            <td class="sepline borderright top">Duration<br>02:00</td>
            </tr></table>"#,
        );
        let modes = extract("A", "B", &html).unwrap().modes;
        assert_eq!(modes.train.duration_seconds, Some(7200));
    }

    #[test]
    fn flight_sentinel_without_breakdown() {
        let html = page(
            r#"<table>
            <tr class="lc_hide"><td class="sepline">Carbon dioxide (CO2) in kg</td>
              <td class="sepline nowrap right">3,5</td><td class="sepline nowrap right">41,0</td></tr>
            <tr class="lc_hide"><td class="sepline">Energy resource consumption in litres</td>
              <td class="sepline nowrap right">1,5</td><td class="sepline nowrap right">17,0</td></tr>
            </table>"#,
        );
        let modes = extract("Bern", "Zurich", &html).unwrap().modes;

        assert_eq!(modes.train.co2, Some(3.5));
        assert_eq!(modes.car.co2, Some(41.0));
        assert_eq!(modes.flight.co2, Some(FLIGHT_SENTINEL));
        assert_eq!(modes.flight.energy_consumption, Some(FLIGHT_SENTINEL));
        assert_eq!(modes.flight.duration_seconds, Some(-1));
    }

    #[test]
    fn third_duration_cell_replaces_flight_sentinel_duration() {
        let html = page(
            r#"<table>
            <tr class="lc_hide"><td class="sepline">Carbon dioxide (CO2) in kg</td>
              <td class="sepline nowrap right">3,5</td><td class="sepline nowrap right">41,0</td></tr>
            <tr>
            <td class="sepline borderright top">Duration<br>01:02</td>
            <td class="sepline borderright top">Duration<br>01:30</td>
            <td class="sepline borderright top">Duration<br>03:15</td>
            </tr></table>"#,
        );
        let modes = extract("Bern", "Zurich", &html).unwrap().modes;

        assert_eq!(modes.flight.co2, Some(FLIGHT_SENTINEL));
        assert_eq!(modes.flight.duration_seconds, Some(3 * 3600 + 15 * 60));
        assert_eq!(modes.train.duration_seconds, Some(3600 + 2 * 60));
    }

    #[test]
    fn oversized_duration_is_left_absent() {
        let html = page(
            r#"<table><tr>
            <td class="sepline borderright top">Duration<br>9999999999999999:00</td>
            <td class="sepline borderright top">Duration<br>02:00</td>
            </tr></table>"#,
        );
        let modes = extract("A", "B", &html).unwrap().modes;
        assert_eq!(modes.train.duration_seconds, None);
        assert_eq!(modes.car.duration_seconds, Some(7200));
    }

    #[test]
    fn flight_sums_access_and_flight_legs() {
        let html = page(
            r#"<table><tr class="lc_hide"><td class="sepline">Carbon dioxide (CO2) in kg</td>
              <td class="sepline nowrap right">22,5</td><td class="sepline nowrap right">180,25</td>
              <td class="sepline nowrap right">12,5</td><td class="sepline nowrap right">150,25</td>
            </tr></table>"#,
        );
        let modes = extract("Paris", "Berlin", &html).unwrap().modes;
        assert_eq!(modes.flight.co2, Some(162.75));
        assert_eq!(modes.flight.duration_seconds, None);
    }

    #[test]
    fn rows_outside_detail_class_are_ignored() {
        let html = page(
            r#"<table><tr class="lc_show"><td class="sepline">Carbon dioxide</td>
              <td class="sepline nowrap right">9,0</td><td class="sepline nowrap right">9,0</td>
            </tr></table>"#,
        );
        let modes = extract("A", "B", &html).unwrap().modes;
        assert!(modes.is_absent());
    }

    #[test]
    fn empty_page_yields_absent_metrics() {
        let extraction = extract("A", "B", &page("")).unwrap();
        assert!(extraction.modes.is_absent());
        assert_eq!(extraction.artifact_url, None);
    }
}
