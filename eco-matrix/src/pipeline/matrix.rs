//! Running the pipeline over many city pairs.
//!
//! Pairs are independent, so up to `workers` of them are in flight at once.
//! A pair that fails is logged and recorded; it never stops the run.
//! Results come back in the order the pairs were given.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::pair::{PairError, PairOutcome, Pipeline};
use super::pairs::CityPair;
use super::source::{ComparisonSource, StationLookup};

/// Configuration for a matrix run.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Maximum number of pairs processed concurrently.
    pub workers: usize,
}

impl MatrixConfig {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

/// Cooperative stop signal, checked before each pair starts.
///
/// A pair already in progress always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A pair that could not be compared.
#[derive(Debug)]
pub struct PairFailure {
    pub pair: CityPair,
    pub error: PairError,
}

/// Outcome of a matrix run.
#[derive(Debug, Default)]
pub struct MatrixReport {
    /// Compared pairs, in input order.
    pub outcomes: Vec<PairOutcome>,

    /// Failed pairs, in input order.
    pub failures: Vec<PairFailure>,

    /// Pairs never started because the run was cancelled.
    pub cancelled: usize,
}

impl MatrixReport {
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.failures.len() + self.cancelled
    }
}

enum PairStatus {
    Done(PairOutcome),
    Failed(PairFailure),
    Cancelled,
}

/// Compare every pair, at most `config.workers` at a time.
pub async fn run_matrix<S, C>(
    pipeline: &Pipeline<S, C>,
    pairs: &[CityPair],
    config: &MatrixConfig,
    cancel: &CancelFlag,
) -> MatrixReport
where
    S: StationLookup,
    C: ComparisonSource,
{
    info!(
        pairs = pairs.len(),
        workers = config.workers,
        "Starting matrix run"
    );

    let mut statuses: Vec<(usize, PairStatus)> = stream::iter(pairs.iter().enumerate())
        .map(|(idx, pair)| async move {
            if cancel.is_cancelled() {
                return (idx, PairStatus::Cancelled);
            }

            match pipeline.compare(&pair.origin, &pair.destination).await {
                Ok(outcome) => {
                    debug!(pair = %pair, "Pair done");
                    (idx, PairStatus::Done(outcome))
                }
                Err(error) => {
                    warn!(pair = %pair, error = %error, "Skipping pair");
                    (
                        idx,
                        PairStatus::Failed(PairFailure {
                            pair: pair.clone(),
                            error,
                        }),
                    )
                }
            }
        })
        .buffer_unordered(config.workers.max(1))
        .collect()
        .await;

    statuses.sort_by_key(|(idx, _)| *idx);

    let mut report = MatrixReport::default();
    for (_, status) in statuses {
        match status {
            PairStatus::Done(outcome) => report.outcomes.push(outcome),
            PairStatus::Failed(failure) => report.failures.push(failure),
            PairStatus::Cancelled => report.cancelled += 1,
        }
    }

    info!(
        compared = report.outcomes.len(),
        failed = report.failures.len(),
        cancelled = report.cancelled,
        "Matrix run complete"
    );

    report
}
