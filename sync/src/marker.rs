//! Completion marker. Its presence is the only meaningful fact.

use std::fs;

use dexteam_cache::{RecordStore, StoreError};
use tracing::info;

/// True once a full pass has run to the end, whether or not every id succeeded
pub fn is_download_complete(store: &RecordStore) -> bool {
    store.layout().marker_file().is_file()
}

/// Delete the marker so the next run makes a fresh pass.
///
/// With `purge`, cached records, sprites and the index are deleted too.
/// Returns the number of cached files purged.
pub fn reset_download(store: &RecordStore, purge: bool) -> Result<usize, StoreError> {
    let marker = store.layout().marker_file();
    match fs::remove_file(&marker) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(StoreError::Io { path: marker, source: e }),
    }

    let purged = if purge { store.purge()? } else { 0 };
    info!(purge, purged, "Bulk sync reset");
    Ok(purged)
}

pub(crate) fn write_marker(store: &RecordStore) -> Result<(), StoreError> {
    let marker = store.layout().marker_file();
    fs::write(&marker, chrono::Utc::now().to_rfc3339())
        .map_err(|source| StoreError::Io { path: marker, source })
}
