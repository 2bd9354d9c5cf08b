
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use dexteam_cache::{RecordStore, StoreError};
use dexteam_model::RecordError;
use thiserror::Error;
use tracing::{info, warn};

use crate::SyncError;
use crate::fetch::{FetchError, Fetcher};
use crate::marker;
use crate::progress::{ProgressSink, SyncProgress};

/// Number of species in the national dex as of Gen 9
pub const DEFAULT_TOTAL: u32 = 1025;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Ids `1..=total` are synced
    pub total: u32,
    /// Pause after each remote fetch
    pub delay: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL,
            delay: Duration::from_millis(10),
        }
    }
}

/// Stops a running sync before its next id
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub total: u32,
    /// Ids settled as cached, whether skipped or fetched this run
    pub downloaded: u32,
    /// Ids fetched from the remote source this run
    pub fetched: u32,
    pub failed: u32,
    /// The run stopped early; no completion marker was written
    pub cancelled: bool,
    pub elapsed: Duration,
}

#[derive(Error, Debug)]
enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Invalid(#[from] RecordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Sequential, resumable fetch-and-persist loop over ids `1..=total`.
///
/// One id at a time, in ascending order. An id whose record and sprite are
/// both cached is counted without fetching, so an interrupted run picks up
/// where it stopped. A failing id is counted and skipped.
pub struct BulkSync<F> {
    store: Arc<RecordStore>,
    fetcher: F,
    config: SyncConfig,
    cancel: CancelToken,
}

impl<F: Fetcher> BulkSync<F> {
    pub fn new(store: Arc<RecordStore>, fetcher: F, config: SyncConfig) -> Self {
        Self {
            store,
            fetcher,
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn is_complete(&self) -> bool {
        marker::is_download_complete(&self.store)
    }

    /// Run one pass over every id.
    ///
    /// Only a cache directory that cannot be created, or a completion marker
    /// that cannot be written, fails the run.
    pub async fn run<P: ProgressSink>(&self, progress: &mut P) -> Result<SyncReport, SyncError> {
        self.store.layout().ensure().map_err(SyncError::Setup)?;

        let started = Instant::now();
        let total = self.config.total;
        let mut report = SyncReport {
            total,
            ..Default::default()
        };
        info!(total, "Starting bulk sync");

        for id in 1..=total {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            progress.report(SyncProgress {
                current: report.downloaded,
                total,
                current_id: id,
                failed: report.failed,
                is_complete: false,
                elapsed: started.elapsed(),
            });

            if self.store.has_both(id) {
                report.downloaded += 1;
                continue;
            }

            match self.fetch_and_store(id).await {
                Ok(()) => {
                    report.downloaded += 1;
                    report.fetched += 1;
                }
                Err(e) => {
                    warn!(id, error = %e, "Failed to sync species");
                    report.failed += 1;
                }
            }

            if !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        report.elapsed = started.elapsed();
        if report.cancelled {
            info!(
                downloaded = report.downloaded,
                failed = report.failed,
                "Bulk sync cancelled"
            );
            return Ok(report);
        }

        let marked = marker::write_marker(&self.store);
        progress.report(SyncProgress {
            current: report.downloaded,
            total,
            current_id: 0,
            failed: report.failed,
            is_complete: true,
            elapsed: report.elapsed,
        });
        info!(
            downloaded = report.downloaded,
            fetched = report.fetched,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Bulk sync finished"
        );

        marked.map_err(SyncError::Marker)?;
        Ok(report)
    }

    async fn fetch_and_store(&self, id: u32) -> Result<(), ItemError> {
        let fetched = self.fetcher.fetch_by_id(id).await?.ensure_id(id)?;
        fetched.species.validate()?;
        fetched.persist(&self.store)?;
        Ok(())
    }
}
