use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Team, TeamError};

/// Saved teams, one `team_<id>.json` file each
#[derive(Debug, Clone)]
pub struct TeamStore {
    dir: PathBuf,
}

impl TeamStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, TeamError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| TeamError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn team_path(&self, id: u32) -> PathBuf {
        self.dir.join(format!("team_{id}.json"))
    }

    /// Every readable team, ascending by id. Unreadable files are skipped.
    pub fn load_all(&self) -> Vec<Team> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Failed to list teams");
                return Vec::new();
            }
        };

        let mut teams: Vec<Team> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| match read_team(&path) {
                Ok(team) => Some(team),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable team file");
                    None
                }
            })
            .collect();
        teams.sort_by_key(|team| team.id);
        teams
    }

    pub fn load(&self, id: u32) -> Result<Team, TeamError> {
        let path = self.team_path(id);
        if !path.is_file() {
            return Err(TeamError::NotFound(id));
        }
        read_team(&path)
    }

    /// Write the team, replacing any saved team with the same id
    pub fn save(&self, team: &Team) -> Result<(), TeamError> {
        let path = self.team_path(team.id);
        let json = serde_json::to_vec_pretty(team).map_err(|source| TeamError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| TeamError::Io { path, source })?;
        debug!(id = team.id, members = team.len(), "Saved team");
        Ok(())
    }

    pub fn delete(&self, id: u32) -> Result<(), TeamError> {
        let path = self.team_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TeamError::NotFound(id)),
            Err(source) => Err(TeamError::Io { path, source }),
        }
    }

    /// One past the highest saved id, starting at 1
    pub fn next_id(&self) -> u32 {
        self.load_all().last().map_or(1, |team| team.id + 1)
    }
}

fn read_team(path: &Path) -> Result<Team, TeamError> {
    let bytes = fs::read(path).map_err(|source| TeamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| TeamError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
