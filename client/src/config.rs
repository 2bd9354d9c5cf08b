use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dexteam_sync::{DEFAULT_TOTAL, SyncConfig};
use serde::{Deserialize, Serialize};

/// Overrides `cache_dir` when set
pub const CACHE_DIR_ENV: &str = "DEXTEAM_CACHE_DIR";

/// Where the cache and saved teams live, and how bulk sync behaves.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    pub cache_dir: PathBuf,
    pub teams_dir: PathBuf,
    pub sync_total: u32,
    pub sync_delay_ms: u64,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("pokemon_cache"),
            teams_dir: PathBuf::from("teams"),
            sync_total: DEFAULT_TOTAL,
            sync_delay_ms: 10,
        }
    }
}

impl DexConfig {
    /// Defaults, with both directories placed under `root`
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            cache_dir: root.join("pokemon_cache"),
            teams_dir: root.join("teams"),
            ..Default::default()
        }
    }

    /// Defaults plus the environment override
    pub fn from_env() -> Self {
        Self::default().with_cache_dir_override(std::env::var_os(CACHE_DIR_ENV))
    }

    /// Load a JSON config file, then apply the environment override
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config.with_cache_dir_override(std::env::var_os(CACHE_DIR_ENV)))
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            total: self.sync_total,
            delay: Duration::from_millis(self.sync_delay_ms),
        }
    }

    fn with_cache_dir_override(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DexConfig::default();
        assert_eq!(config.sync_total, 1025);
        let sync = config.sync_config();
        assert_eq!(sync.total, 1025);
        assert_eq!(sync.delay, Duration::from_millis(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dex.json");
        fs::write(&path, r#"{ "sync_total": 151, "teams_dir": "/tmp/my-teams" }"#).unwrap();

        let config: DexConfig = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.sync_total, 151);
        assert_eq!(config.teams_dir, PathBuf::from("/tmp/my-teams"));
        assert_eq!(config.sync_delay_ms, 10);
    }

    #[test]
    fn test_missing_or_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(DexConfig::from_file(dir.path().join("absent.json")).is_err());

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ sync_total: ").unwrap();
        let err = DexConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_cache_dir_override() {
        let config = DexConfig::default().with_cache_dir_override(Some("/data/dex".into()));
        assert_eq!(config.cache_dir, PathBuf::from("/data/dex"));

        let config = DexConfig::default().with_cache_dir_override(Some(OsString::new()));
        assert_eq!(config.cache_dir, PathBuf::from("pokemon_cache"));
    }

    #[test]
    fn test_with_root() {
        let config = DexConfig::with_root("/srv");
        assert_eq!(config.cache_dir, PathBuf::from("/srv/pokemon_cache"));
        assert_eq!(config.teams_dir, PathBuf::from("/srv/teams"));
    }
}
