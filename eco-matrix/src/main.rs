use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eco_matrix::cities::read_cities;
use eco_matrix::comparison::{ComparisonClient, ComparisonConfig, TravelSchedule};
use eco_matrix::extract::ResultExtractor;
use eco_matrix::output::{ArtifactDownloader, MatrixWriter};
use eco_matrix::pipeline::{CancelFlag, MatrixConfig, PairOrder, Pipeline, city_pairs, run_matrix};
use eco_matrix::stations::{
    CacheConfig, CachedStationResolver, StationClient, StationClientConfig,
};

/// Build a CO2 / energy / duration matrix for train, car and plane between
/// every pair of cities in a list.
#[derive(Debug, Parser)]
#[command(name = "eco-matrix", version)]
struct Args {
    /// File with one city name per line
    #[arg(long)]
    cities: PathBuf,

    /// CSV file to write
    #[arg(long, default_value = "city_pairs_co2_duration.csv")]
    output: PathBuf,

    /// Travel date used for every query (YYYY-MM-DD)
    #[arg(long, default_value = "2024-03-01")]
    date: NaiveDate,

    /// Earliest departure time (HH:MM)
    #[arg(long, default_value = "06:00")]
    time: NaiveTime,

    /// Pairs processed concurrently
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Maximum concurrent requests to the comparison endpoint
    #[arg(long, default_value_t = 4)]
    max_requests: usize,

    /// Compare both directions of each pair
    #[arg(long)]
    ordered: bool,

    /// Directory to save route KML files into
    #[arg(long)]
    kml_dir: Option<PathBuf>,

    /// Retries after a network failure
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eco_matrix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let cities = read_cities(&args.cities)?;
    let order = if args.ordered {
        PairOrder::Ordered
    } else {
        PairOrder::Unordered
    };
    let pairs = city_pairs(&cities, order);
    info!(cities = cities.len(), pairs = pairs.len(), "Loaded city list");

    let station_client = StationClient::new(StationClientConfig::new().with_timeout(args.timeout))
        .context("Failed to create station client")?;
    let stations = CachedStationResolver::new(station_client, &CacheConfig::default());

    let comparison_config = ComparisonConfig::new()
        .with_max_concurrent(args.max_requests)
        .with_max_retries(args.retries)
        .with_timeout(args.timeout);
    let comparisons =
        ComparisonClient::new(comparison_config).context("Failed to create comparison client")?;

    let schedule = TravelSchedule::new(args.date, args.time);
    let pipeline = Pipeline::new(stations, comparisons, ResultExtractor::default(), schedule);

    // Stop starting new pairs on Ctrl-C; pairs in flight still finish
    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing pairs in progress");
            on_signal.cancel();
        }
    });

    let matrix_config = MatrixConfig::new(args.workers);
    let report = run_matrix(&pipeline, &pairs, &matrix_config, &cancel).await;

    let mut writer = MatrixWriter::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for outcome in &report.outcomes {
        writer.write_result(&outcome.result)?;
    }
    let rows = writer.rows();
    writer.finish()?;
    info!(rows, path = %args.output.display(), "Data has been written");

    if let Some(dir) = args.kml_dir {
        let downloader = ArtifactDownloader::new(pipeline.comparisons().http().clone(), dir);
        let saved = downloader
            .download_all(&report.outcomes, args.workers)
            .await
            .context("Failed to prepare KML directory")?;
        info!(saved, dir = %downloader.dir().display(), "Saved route files");
    }

    if report.cancelled > 0 {
        warn!(skipped = report.cancelled, "Run was cancelled before all pairs started");
    }

    Ok(())
}
