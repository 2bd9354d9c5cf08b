//! Dual-keyed record and sprite storage

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dexteam_model::{Species, name_key};
use tracing::{debug, warn};

use crate::StoreError;
use crate::layout::{CacheLayout, RecordKey, SpriteVariant};

/// Species records and sprites stored under both id and name keys.
///
/// Reads never have side effects. A record is only considered cached when its
/// id-keyed data file and id-keyed sprite are both present (see [`has_both`]),
/// since the two files are written separately.
///
/// [`has_both`]: RecordStore::has_both
#[derive(Debug, Clone)]
pub struct RecordStore {
    layout: CacheLayout,
}

impl RecordStore {
    /// Open a store rooted at `root`, creating its directories
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let layout = CacheLayout::new(root);
        layout.ensure()?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    /// Write the record under both its id and its lowercase name
    pub fn put(&self, species: &Species) -> Result<(), StoreError> {
        species.validate()?;
        let json = serde_json::to_vec_pretty(species).map_err(|source| StoreError::Serialize {
            what: format!("species {}", species.id),
            source,
        })?;

        for key in dual_keys(species) {
            write_file(&self.layout.record_path(&key), &json)?;
        }
        debug!(id = species.id, name = %species.name, "Cached species record");
        Ok(())
    }

    /// Write a sprite blob under both keys of its species
    pub fn put_sprite(
        &self,
        species: &Species,
        variant: SpriteVariant,
        bytes: &[u8],
    ) -> Result<(), StoreError> {
        species.validate()?;
        for key in dual_keys(species) {
            write_file(&self.layout.sprite_path(&key, variant), bytes)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &RecordKey) -> Result<Species, StoreError> {
        let key = safe_key(key)?;
        let path = self.layout.record_path(key);
        read_species(&path).map_err(|e| match e {
            StoreError::NotFound(_) => StoreError::NotFound(key.to_string()),
            other => other,
        })
    }

    pub fn get_by_name(&self, name: &str) -> Result<Species, StoreError> {
        self.get(&RecordKey::name(name))
    }

    pub fn get_by_id(&self, id: u32) -> Result<Species, StoreError> {
        self.get(&RecordKey::Id(id))
    }

    /// True when both the id-keyed record and id-keyed sprite exist
    pub fn has_both(&self, id: u32) -> bool {
        let key = RecordKey::Id(id);
        self.layout.record_path(&key).is_file()
            && self
                .layout
                .sprite_path(&key, SpriteVariant::Normal)
                .is_file()
    }

    pub fn sprite_path(&self, key: &RecordKey, shiny: bool) -> Result<PathBuf, StoreError> {
        let key = safe_key(key)?;
        let path = self
            .layout
            .sprite_path(key, SpriteVariant::from_shiny(shiny));
        if path.is_file() {
            Ok(path)
        } else {
            Err(StoreError::NotFound(path.display().to_string()))
        }
    }

    /// Remove a record and its sprites.
    ///
    /// When the name-keyed record resolves, its id-keyed files go too, so the
    /// next bulk sync fetches it again. Names that could never have been
    /// stored are ignored.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let name_key = RecordKey::name(name);
        if !name_key.is_path_safe() {
            warn!(name, "Refusing to remove unsafe cache key");
            return Ok(());
        }
        let mut keys = vec![name_key.clone()];
        if let Ok(species) = self.get(&name_key) {
            keys.push(RecordKey::Id(species.id));
        }

        for key in &keys {
            remove_file(&self.layout.record_path(key))?;
            remove_file(&self.layout.sprite_path(key, SpriteVariant::Normal))?;
            remove_file(&self.layout.sprite_path(key, SpriteVariant::Shiny))?;
        }
        debug!(name = %name_key, "Removed species from cache");
        Ok(())
    }

    /// Favorite species names (lowercased). Missing or corrupt file reads as empty.
    pub fn favorites(&self) -> BTreeSet<String> {
        let path = self.layout.favorites_file();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeSet::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read favorites");
                return BTreeSet::new();
            }
        };
        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(names) => names.iter().map(|n| name_key(n)).collect(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable favorites file");
                BTreeSet::new()
            }
        }
    }

    pub fn save_favorites(&self, favorites: &BTreeSet<String>) -> Result<(), StoreError> {
        let names: BTreeSet<String> = favorites.iter().map(|n| name_key(n)).collect();
        let json = serde_json::to_vec_pretty(&names).map_err(|source| StoreError::Serialize {
            what: "favorites".to_string(),
            source,
        })?;
        write_file(&self.layout.favorites_file(), &json)
    }

    /// Every record artifact (id- and name-keyed), sorted by file name
    pub fn record_files(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(self.layout.root()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.layout.root().display(), error = %e, "Failed to list cache");
                return Vec::new();
            }
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| CacheLayout::is_record_file(path))
            .collect();
        files.sort();
        files
    }

    /// Delete every record, sprite and the index. Favorites survive.
    ///
    /// Returns the number of files removed.
    pub fn purge(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for path in self.record_files() {
            remove_file(&path)?;
            removed += 1;
        }

        let sprites = self.layout.sprites_dir();
        if let Ok(entries) = fs::read_dir(&sprites) {
            for path in entries.filter_map(|entry| entry.ok().map(|e| e.path())) {
                if path.extension().is_some_and(|ext| ext == "png") {
                    remove_file(&path)?;
                    removed += 1;
                }
            }
        }

        remove_file(&self.layout.index_file())?;
        debug!(removed, "Purged cache");
        Ok(removed)
    }
}

/// Unsafe names can never have been written, so they read as a cache miss
fn safe_key(key: &RecordKey) -> Result<&RecordKey, StoreError> {
    if key.is_path_safe() {
        Ok(key)
    } else {
        Err(StoreError::NotFound(key.to_string()))
    }
}

fn dual_keys(species: &Species) -> [RecordKey; 2] {
    [RecordKey::Id(species.id), RecordKey::name(&species.name)]
}

/// Read one record artifact. Absent and unparsable both map to `NotFound`.
pub(crate) fn read_species(path: &Path) -> Result<Species, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Treating unparsable record as absent");
        StoreError::NotFound(path.display().to_string())
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    fs::write(path, bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Cache write failed");
        StoreError::io(path, e)
    })
}

/// Remove a file, treating an already-missing file as success
pub(crate) fn remove_file(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
