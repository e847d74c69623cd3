//! Comparing a single city pair.

use tracing::debug;
use url::Url;

use crate::comparison::{ComparisonQuery, FetchError, TravelSchedule};
use crate::domain::ComparisonResult;
use crate::extract::{ExtractionError, ResultExtractor};
use crate::stations::ResolutionError;

use super::source::{ComparisonSource, StationLookup};

/// Why a city pair could not be compared.
#[derive(Debug, thiserror::Error)]
pub enum PairError {
    /// A city name did not resolve to a station
    #[error("could not resolve {city:?}: {source}")]
    Resolution {
        city: String,
        #[source]
        source: ResolutionError,
    },

    /// The comparison page could not be fetched
    #[error("comparison fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The comparison page was not markup
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// A compared pair, plus the route file link the page offered.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    pub result: ComparisonResult,
    pub artifact_url: Option<Url>,
}

/// Resolve, fetch, extract.
pub struct Pipeline<S, C> {
    stations: S,
    comparisons: C,
    extractor: ResultExtractor,
    schedule: TravelSchedule,
}

impl<S: StationLookup, C: ComparisonSource> Pipeline<S, C> {
    pub fn new(
        stations: S,
        comparisons: C,
        extractor: ResultExtractor,
        schedule: TravelSchedule,
    ) -> Self {
        Self {
            stations,
            comparisons,
            extractor,
            schedule,
        }
    }

    pub fn stations(&self) -> &S {
        &self.stations
    }

    pub fn comparisons(&self) -> &C {
        &self.comparisons
    }

    /// Compare one pair of cities.
    ///
    /// Both names are resolved before anything is fetched; an unresolvable
    /// city fails the pair rather than sending an empty station id.
    pub async fn compare(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<PairOutcome, PairError> {
        let (origin_station, destination_station) = futures::join!(
            self.stations.resolve(origin),
            self.stations.resolve(destination)
        );

        let origin_station = origin_station.map_err(|source| PairError::Resolution {
            city: origin.to_string(),
            source,
        })?;
        let destination_station = destination_station.map_err(|source| {
            PairError::Resolution {
                city: destination.to_string(),
                source,
            }
        })?;

        let query = ComparisonQuery::new(&origin_station, &destination_station, self.schedule);
        let content = self.comparisons.fetch(&query).await?;

        // Extraction is synchronous and never suspends
        let extraction = self.extractor.extract(origin, destination, &content)?;
        let artifact_url = extraction.artifact_url.clone();

        debug!(
            pair = %extraction.id,
            unavailable = extraction.modes.is_absent(),
            "Compared pair"
        );

        Ok(PairOutcome {
            result: extraction.into_result(origin_station, destination_station),
            artifact_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::pipeline::testing::{FIXTURE, MockComparisons, MockStations, UNAVAILABLE};

    fn pipeline(page: &'static str) -> Pipeline<MockStations, MockComparisons> {
        Pipeline::new(
            MockStations::europe(),
            MockComparisons::serving(page),
            ResultExtractor::default(),
            TravelSchedule::default(),
        )
    }

    #[tokio::test]
    async fn paris_to_berlin_end_to_end() {
        let outcome = pipeline(FIXTURE).compare("Paris", "Berlin").await.unwrap();
        let result = outcome.result;

        assert_eq!(result.id, "Paris to Berlin");
        assert_eq!(result.origin.display_name, "Paris");
        assert_eq!(result.destination.display_name, "Berlin Hbf");
        assert_eq!(
            result.origin.coordinates,
            Some(Coordinates::new(48.856614, 2.351492))
        );

        let train = &result.modes.train;
        assert_eq!(train.co2, Some(22.5));
        assert_eq!(train.energy_consumption, Some(9.75));
        assert_eq!(
            train.products,
            Some(vec!["TGV".to_string(), "ICE".to_string()])
        );
        assert_eq!(train.duration_seconds, Some(8 * 3600 + 14 * 60));

        let car = &result.modes.car;
        assert_eq!(car.co2, Some(180.25));
        assert_eq!(car.energy_consumption, Some(72.5));
        assert_eq!(car.products, Some(vec!["Car".to_string()]));
        assert_eq!(car.duration_seconds, Some(10 * 3600 + 5 * 60));

        let flight = &result.modes.flight;
        assert_eq!(flight.co2, Some(162.75));
        assert_eq!(flight.energy_consumption, Some(64.75));
        assert_eq!(
            flight.products,
            Some(vec!["Plane".to_string(), "S-Bahn".to_string()])
        );
        assert_eq!(flight.duration_seconds, Some(4 * 3600 + 30 * 60));
        assert!(!flight.has_sentinel_co2());

        assert_eq!(
            outcome.artifact_url.unwrap().as_str(),
            "https://ecopassenger.hafas.de/bin/query.exe/en?ld=uic-eco&seqnr=1&ident=kx.01&kml=yes"
        );
    }

    #[tokio::test]
    async fn query_uses_resolved_stations() {
        let pipeline = pipeline(FIXTURE);
        pipeline.compare("Paris", "Berlin").await.unwrap();

        let queries = pipeline.comparisons().queries();
        assert_eq!(
            queries,
            [("A=1@O=Paris@".to_string(), "A=1@O=Berlin Hbf@".to_string())]
        );
    }

    #[tokio::test]
    async fn unavailable_keeps_stations_but_no_metrics() {
        let outcome = pipeline(UNAVAILABLE).compare("Paris", "Lhasa").await.unwrap();

        assert!(outcome.result.is_unavailable());
        assert_eq!(outcome.result.id, "Paris to Lhasa");
        assert!(outcome.result.origin.coordinates.is_some());
        assert!(outcome.result.destination.coordinates.is_some());
        assert_eq!(outcome.artifact_url, None);
    }

    #[tokio::test]
    async fn unknown_city_is_resolution_error_and_nothing_is_fetched() {
        let pipeline = pipeline(FIXTURE);
        let err = pipeline.compare("Paris", "Atlantis").await.unwrap_err();

        match err {
            PairError::Resolution { city, source } => {
                assert_eq!(city, "Atlantis");
                assert!(matches!(source, ResolutionError::MalformedResponse(_)));
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
        assert!(pipeline.comparisons().queries().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_is_reported() {
        let pipeline = Pipeline::new(
            MockStations::europe(),
            MockComparisons::failing(503),
            ResultExtractor::default(),
            TravelSchedule::default(),
        );

        let err = pipeline.compare("Paris", "Berlin").await.unwrap_err();
        assert!(matches!(err, PairError::Fetch(FetchError::HttpStatus(503))));
    }

    #[tokio::test]
    async fn non_markup_is_extraction_error() {
        let err = pipeline("Service Unavailable")
            .compare("Paris", "Berlin")
            .await
            .unwrap_err();
        assert!(matches!(err, PairError::Extraction(_)));
    }

    #[test]
    fn error_display_names_city() {
        let err = PairError::Resolution {
            city: "Atlantis".into(),
            source: ResolutionError::MalformedResponse("no suggestions".into()),
        };
        assert_eq!(
            err.to_string(),
            "could not resolve \"Atlantis\": malformed suggestion payload: no suggestions"
        );
    }
}
