//! Lazily built, persisted species index

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use dexteam_model::IndexEntry;
use tracing::{debug, warn};

use crate::store::{RecordStore, read_species, remove_file};

/// Owner of the in-memory [`IndexEntry`] list.
///
/// The list is built at most once until [`invalidate`](Self::invalidate):
/// concurrent first callers serialize on a build lock and re-check the cache
/// under it, so only one of them loads or scans. Entries are unique by id and
/// sorted ascending by id.
#[derive(Debug)]
pub struct SpeciesIndex {
    store: Arc<RecordStore>,
    cached: RwLock<Option<Arc<[IndexEntry]>>>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl SpeciesIndex {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            cached: RwLock::new(None),
            build_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Get the index, loading or building it on first access
    pub fn get(&self) -> Arc<[IndexEntry]> {
        if let Some(entries) = self.cached() {
            return entries;
        }

        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = self.cached() {
            return entries;
        }

        self.builds.fetch_add(1, Ordering::Relaxed);
        let entries: Arc<[IndexEntry]> = match self.load_persisted() {
            Some(entries) => entries,
            None => self.rebuild(),
        }
        .into();

        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(entries.clone());
        entries
    }

    /// Drop the cached list and the index file; the next [`get`](Self::get) rebuilds.
    pub fn invalidate(&self) {
        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;

        let path = self.store.layout().index_file();
        if let Err(e) = remove_file(&path) {
            warn!(error = %e, "Failed to delete index file");
        }
        debug!("Species index invalidated");
    }

    /// Number of times the list was loaded or built
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    fn cached(&self) -> Option<Arc<[IndexEntry]>> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn load_persisted(&self) -> Option<Vec<IndexEntry>> {
        let path = self.store.layout().index_file();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read index file");
                return None;
            }
        };

        let entries: Vec<IndexEntry> = match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Rebuilding unreadable index file");
                return None;
            }
        };
        if entries.is_empty() {
            return None;
        }

        let entries = normalize(entries);
        debug!(entries = entries.len(), "Loaded persisted species index");
        Some(entries)
    }

    fn rebuild(&self) -> Vec<IndexEntry> {
        let files = self.store.record_files();
        let mut skipped = 0usize;
        let entries: Vec<IndexEntry> = files
            .iter()
            .filter_map(|path| match read_species(path) {
                Ok(species) if species.id > 0 => Some(IndexEntry::from(&species)),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        let entries = normalize(entries);

        let path = self.store.layout().index_file();
        match serde_json::to_vec(&entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!(path = %path.display(), error = %e, "Failed to persist species index");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize species index"),
        }

        debug!(
            files = files.len(),
            skipped,
            entries = entries.len(),
            "Built species index from records"
        );
        entries
    }
}

/// Keep the first entry per id, then sort ascending by id
fn normalize(entries: Vec<IndexEntry>) -> Vec<IndexEntry> {
    let mut seen = HashSet::new();
    let mut unique: Vec<IndexEntry> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id))
        .collect();
    unique.sort_by_key(|entry| entry.id);
    unique
}
