//! File naming for the cache directory

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use dexteam_model::name_key;

use crate::StoreError;

const SPRITES_DIR: &str = "sprites";
const FAVORITES_FILE: &str = ".favorites.json";
const INDEX_FILE: &str = ".index.json";
const MARKER_FILE: &str = ".sync_complete";

/// Either half of the dual key a record is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(u32),
    /// Always stored lowercased
    Name(String),
}

impl RecordKey {
    pub fn name(name: &str) -> Self {
        RecordKey::Name(name_key(name))
    }

    /// Numeric input resolves to an id key, anything else to a name key
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<u32>() {
            Ok(id) => RecordKey::Id(id),
            Err(_) => RecordKey::name(input),
        }
    }

    /// False for name keys that would resolve outside the cache directory
    /// or onto a metadata file
    pub fn is_path_safe(&self) -> bool {
        match self {
            RecordKey::Id(_) => true,
            RecordKey::Name(name) => {
                !name.is_empty()
                    && !name.starts_with('.')
                    && !name.contains(['/', '\\', '\0'])
            }
        }
    }
}

impl From<u32> for RecordKey {
    fn from(id: u32) -> Self {
        RecordKey::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(input: &str) -> Self {
        RecordKey::parse(input)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "{id}"),
            RecordKey::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteVariant {
    Normal,
    Shiny,
}

impl SpriteVariant {
    pub fn from_shiny(shiny: bool) -> Self {
        if shiny {
            SpriteVariant::Shiny
        } else {
            SpriteVariant::Normal
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SpriteVariant::Normal => "",
            SpriteVariant::Shiny => "_shiny",
        }
    }
}

/// Paths of every artifact under one cache root
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root and sprites directories
    pub fn ensure(&self) -> Result<(), StoreError> {
        let sprites = self.sprites_dir();
        fs::create_dir_all(&sprites).map_err(|e| StoreError::io(sprites, e))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sprites_dir(&self) -> PathBuf {
        self.root.join(SPRITES_DIR)
    }

    pub fn record_path(&self, key: &RecordKey) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn sprite_path(&self, key: &RecordKey, variant: SpriteVariant) -> PathBuf {
        self.sprites_dir()
            .join(format!("{key}{}.png", variant.suffix()))
    }

    pub fn favorites_file(&self) -> PathBuf {
        self.root.join(FAVORITES_FILE)
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn marker_file(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    /// Metadata files start with a dot and never collide with record keys
    pub fn is_record_file(path: &Path) -> bool {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| n.starts_with('.'));
        is_json && !hidden
    }
}
