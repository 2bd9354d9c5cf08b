//! Local species cache.
//!
//! # Overview
//!
//! - [`RecordStore`] - species records and sprite blobs on disk, each
//!   addressable by numeric id and by lowercase name, plus the favorites set
//! - [`SpeciesIndex`] - lazily built, persisted [`IndexEntry`] list used for
//!   filtering without deserializing every record
//! - [`IndexQuery`] / [`suggest`] - filtering and name completion over the index
//!
//! # Layout
//!
//! ```text
//! <root>/<id>.json              record, by id
//! <root>/<name>.json            record, by lowercase name
//! <root>/sprites/<key>.png      sprite, by id and by name
//! <root>/sprites/<key>_shiny.png
//! <root>/.favorites.json
//! <root>/.index.json
//! <root>/.sync_complete         completion marker written by the bulk sync
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod index;
pub mod layout;
pub mod query;
pub mod store;

pub use dexteam_model::{IndexEntry, RecordError, Species};
pub use index::SpeciesIndex;
pub use layout::{CacheLayout, RecordKey, SpriteVariant};
pub use query::{DEFAULT_SUGGESTION_LIMIT, IndexQuery, suggest};
pub use store::RecordStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The artifact is absent or unreadable as a record. Normal control flow.
    #[error("Not cached: {0}")]
    NotFound(String),

    #[error("I/O failure on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    InvalidRecord(#[from] RecordError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
