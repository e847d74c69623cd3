//! Route file (KML) downloads.
//!
//! The comparison page links to a KML rendering of the train route. Saving
//! it is optional and best-effort: a failed download is logged and the
//! pair's figures are kept.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use url::Url;

use crate::pipeline::PairOutcome;

/// Errors downloading a route file.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("route file request returned status {0}")]
    HttpStatus(u16),

    #[error("failed to write route file: {0}")]
    Io(#[from] std::io::Error),
}

/// Saves route files into a directory.
#[derive(Debug, Clone)]
pub struct ArtifactDownloader {
    http: reqwest::Client,
    dir: PathBuf,
}

impl ArtifactDownloader {
    pub fn new(http: reqwest::Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the route file for a pair is saved.
    pub fn path_for(&self, origin: &str, destination: &str) -> PathBuf {
        self.dir.join(format!("{origin}_to {destination}.kml"))
    }

    /// Download one file.
    pub async fn download(&self, url: &Url, path: &Path) -> Result<(), ArtifactError> {
        let response = self.http.get(url.as_str()).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ArtifactError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(path, &bytes).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "Saved route file");
        Ok(())
    }

    /// Download the route file of every outcome that has one. Returns how
    /// many were saved.
    pub async fn download_all(
        &self,
        outcomes: &[PairOutcome],
        workers: usize,
    ) -> Result<usize, ArtifactError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let saved = stream::iter(outcomes)
            .filter_map(|outcome| async move {
                let url = outcome.artifact_url.as_ref()?;
                Some((outcome, url))
            })
            .map(|(outcome, url)| async move {
                let result = &outcome.result;
                let path = self.path_for(&result.origin_city, &result.destination_city);
                match self.download(url, &path).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(pair = %result.id, url = %url, error = %e, "Route file download failed");
                        false
                    }
                }
            })
            .buffer_unordered(workers.max(1))
            .filter(|saved| futures::future::ready(*saved))
            .count()
            .await;

        Ok(saved)
    }
}
