//! Bulk synchronization of the species cache.
//!
//! [`BulkSync`] walks ids `1..=total` in order, skipping every id the
//! [`RecordStore`](dexteam_cache::RecordStore) already holds (record and
//! sprite), fetching the rest through a [`Fetcher`], and counting failures
//! instead of aborting. After a full pass it writes a completion marker.
//!
//! ```ignore
//! let sync = BulkSync::new(store, my_fetcher, SyncConfig::default());
//! let report = sync
//!     .run(&mut |p: SyncProgress| println!("{:.1}%", p.percentage()))
//!     .await?;
//! println!("{} cached, {} failed", report.downloaded, report.failed);
//! ```

use dexteam_cache::StoreError;
use thiserror::Error;

mod fetch;
mod marker;
mod pipeline;
mod progress;

pub use fetch::{FetchError, FetchedSpecies, Fetcher};
pub use marker::{is_download_complete, reset_download};
pub use pipeline::{BulkSync, CancelToken, DEFAULT_TOTAL, SyncConfig, SyncReport};
pub use progress::{ProgressSink, SyncProgress};

/// Failures that stop a whole sync run. Per-id failures never do.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Cannot prepare cache directory: {0}")]
    Setup(#[source] StoreError),

    #[error("Failed to write completion marker: {0}")]
    Marker(#[source] StoreError),
}
