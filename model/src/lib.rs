use thiserror::Error;

pub mod index;
pub mod species;

pub use dexteam_typechart::Type;
pub use index::IndexEntry;
pub use species::{BaseStat, Species, Stat, name_key};

/// Reasons a species record cannot be stored
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid species id: {0}")]
    InvalidId(u32),

    #[error("Species name cannot be empty")]
    EmptyName,

    #[error("Species name is not usable as a key: {0}")]
    InvalidName(String),

    #[error("Species {name} has {count} types, expected at most 2")]
    TooManyTypes { name: String, count: usize },
}
