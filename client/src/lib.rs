//! Offline species browser and team builder.
//!
//! [`Dex`] ties the workspace together: a [`RecordStore`] cache keyed by id
//! and name, the lazily built species index, resumable bulk sync through a
//! caller-supplied [`Fetcher`], saved teams, and team scoring.
//!
//! ```no_run
//! use dexteam_client::{Dex, DexConfig};
//!
//! let dex = Dex::open(DexConfig::from_env())?;
//! if let Some(species) = dex.get_by_name("pikachu")? {
//!     println!("#{} {}", species.id, species.name);
//! }
//! println!("{:?}", dex.suggest("char", &[]));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod config;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dexteam_cache::{DEFAULT_SUGGESTION_LIMIT, SpeciesIndex, StoreError};
use dexteam_model::name_key;
use dexteam_sync::{BulkSync, ProgressSink, is_download_complete, reset_download};
use tracing::{debug, warn};

pub use config::{CACHE_DIR_ENV, DexConfig};
pub use dexteam_cache::{IndexEntry, IndexQuery, RecordKey, RecordStore};
pub use dexteam_model::{Species, Stat, Type};
pub use dexteam_sync::{
    CancelToken, FetchError, FetchedSpecies, Fetcher, SyncProgress, SyncReport,
};
pub use dexteam_team::{
    MAX_TEAM_SIZE, ScoreBreakdown, Team, TeamError, TeamMember, TeamStore, TeamSummary,
};

/// Application facade over the cache, index, sync and team storage
pub struct Dex {
    config: DexConfig,
    store: Arc<RecordStore>,
    index: SpeciesIndex,
    teams: TeamStore,
}

impl Dex {
    /// Open (creating if needed) the cache and team directories
    pub fn open(config: DexConfig) -> Result<Self> {
        let store = RecordStore::open(&config.cache_dir).with_context(|| {
            format!("Failed to open cache at {}", config.cache_dir.display())
        })?;
        let teams = TeamStore::open(&config.teams_dir).with_context(|| {
            format!("Failed to open teams at {}", config.teams_dir.display())
        })?;

        let store = Arc::new(store);
        debug!(cache = %config.cache_dir.display(), "Opened dex");
        Ok(Self {
            index: SpeciesIndex::new(store.clone()),
            store,
            teams,
            config,
        })
    }

    pub fn config(&self) -> &DexConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn teams(&self) -> &TeamStore {
        &self.teams
    }

    /// Cached record by name, or `None` on a cache miss
    pub fn get_by_name(&self, name: &str) -> Result<Option<Species>> {
        found(self.store.get_by_name(name))
    }

    /// Cached record by id, or `None` on a cache miss
    pub fn get_by_id(&self, id: u32) -> Result<Option<Species>> {
        found(self.store.get_by_id(id))
    }

    pub fn sprite_path(&self, key: impl Into<RecordKey>, shiny: bool) -> Result<Option<PathBuf>> {
        found(self.store.sprite_path(&key.into(), shiny))
    }

    /// Cached record, or fetch it and cache it under both keys.
    ///
    /// A record for any other id is rejected. A fresh fetch invalidates the index so the new species shows up in
    /// queries.
    pub async fn get_or_fetch<F: Fetcher>(&self, id: u32, fetcher: &F) -> Result<Species> {
        if let Some(species) = self.get_by_id(id)? {
            return Ok(species);
        }

        let fetched = fetcher
            .fetch_by_id(id)
            .await
            .and_then(|fetched| fetched.ensure_id(id))
            .with_context(|| format!("Failed to fetch species {id}"))?;
        fetched
            .persist(&self.store)
            .with_context(|| format!("Failed to cache species {id}"))?;
        self.index.invalidate();
        Ok(fetched.species)
    }

    pub fn index(&self) -> Arc<[IndexEntry]> {
        self.index.get()
    }

    pub fn invalidate_index(&self) {
        self.index.invalidate();
    }

    pub fn query(&self, query: &IndexQuery) -> Vec<IndexEntry> {
        let entries = self.index.get();
        query.apply(&entries).into_iter().cloned().collect()
    }

    /// Up to eight names completing `prefix`, leaving out `exclude`
    pub fn suggest(&self, prefix: &str, exclude: &[String]) -> Vec<String> {
        dexteam_cache::suggest(&self.index.get(), prefix, DEFAULT_SUGGESTION_LIMIT, exclude)
    }

    pub fn favorites(&self) -> BTreeSet<String> {
        self.store.favorites()
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.store.favorites().contains(&name_key(name))
    }

    /// Flip a favorite and persist the set. Returns the new state.
    pub fn toggle_favorite(&self, name: &str) -> Result<bool> {
        let key = name_key(name);
        let mut favorites = self.store.favorites();
        let now_favorite = if favorites.remove(&key) {
            false
        } else {
            favorites.insert(key);
            true
        };
        self.store
            .save_favorites(&favorites)
            .context("Failed to save favorites")?;
        Ok(now_favorite)
    }

    /// Run a bulk sync pass with the configured universe size and delay.
    ///
    /// The index is invalidated whenever the pass fetched anything.
    pub async fn start_bulk_sync<F, P>(
        &self,
        fetcher: F,
        cancel: CancelToken,
        progress: &mut P,
    ) -> Result<SyncReport>
    where
        F: Fetcher,
        P: ProgressSink,
    {
        let sync = BulkSync::new(self.store.clone(), fetcher, self.config.sync_config())
            .with_cancel(cancel);
        let report = sync.run(progress).await.context("Bulk sync failed")?;

        if report.fetched > 0 {
            self.index.invalidate();
        }
        Ok(report)
    }

    pub fn is_sync_complete(&self) -> bool {
        is_download_complete(&self.store)
    }

    /// Forget that a sync finished. With `purge`, also drop every cached
    /// record and sprite (favorites stay). Returns the number of files purged.
    pub fn reset_sync(&self, purge: bool) -> Result<usize> {
        let purged = reset_download(&self.store, purge).context("Failed to reset sync")?;
        if purge {
            self.index.invalidate();
        }
        Ok(purged)
    }

    /// Team member built from the cached record, with its sprite if cached
    pub fn member(&self, name: &str) -> Result<Option<TeamMember>> {
        let Some(species) = self.get_by_name(name)? else {
            return Ok(None);
        };
        let sprite = self.sprite_path(species.id, false)?;
        Ok(Some(TeamMember::from_species(&species, sprite)))
    }

    /// Score the members' cached records. Members with no cached record are
    /// left out.
    pub fn compute_team_summary(&self, members: &[TeamMember]) -> Result<TeamSummary> {
        let mut species = Vec::with_capacity(members.len());
        for member in members {
            match self.get_by_name(&member.name)? {
                Some(record) => species.push(record),
                None => warn!(name = %member.name, "Team member not cached; skipping"),
            }
        }
        Ok(dexteam_team::score(&species))
    }
}

fn found<T>(result: Result<T, StoreError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
