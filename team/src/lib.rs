//! Teams and team-synergy scoring.
//!
//! - [`Team`] / [`TeamMember`] - an ordered roster of at most [`MAX_TEAM_SIZE`]
//! - [`score`] - pure scoring of a set of species into a [`TeamSummary`]
//! - [`TeamStore`] - one JSON file per team on disk

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod scorer;
mod storage;
mod team;

pub use scorer::{MAX_SCORE, MAX_TEAM_BST, ScoreBreakdown, TeamSummary, score};
pub use storage::TeamStore;
pub use team::{MAX_TEAM_SIZE, Team, TeamMember};

#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Team {0} already has {MAX_TEAM_SIZE} members")]
    Full(String),

    #[error("Team {name} has {count} members, more than {MAX_TEAM_SIZE}")]
    Oversized { name: String, count: usize },

    #[error("No member at slot {0}")]
    NoSuchMember(usize),

    #[error("No saved team with id {0}")]
    NotFound(u32),

    #[error("I/O failure on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed team file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
