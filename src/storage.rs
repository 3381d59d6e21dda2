//! Whole-state snapshot on local disk.
//!
//! The game state is written as one JSON document under a fixed path after
//! every change. Writes go to a sibling temp file (held under an exclusive
//! `fs2` lock) and are renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::game::GameState;

const APP_DIR: &str = "phonics-garden";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read game state '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse game state '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write game state '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode game state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Location of the persisted game state.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/phonics-garden/state.json`, or the current directory when
    /// the platform has no data dir.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join(APP_DIR).join(STATE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state; a missing file yields a fresh game.
    pub fn load(&self) -> Result<GameState, StorageError> {
        if !self.path.exists() {
            return Ok(GameState::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let state: GameState =
            serde_json::from_str(&content).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(state.normalized())
    }

    pub fn save(&self, state: &GameState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        let write_err = |e: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file: File = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(write_err)?;

        FileExt::lock_exclusive(&file).map_err(write_err)?;
        let written = file
            .write_all(json.as_bytes())
            .and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        written.map_err(write_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("state.json"));
        assert_eq!(storage.load().unwrap(), GameState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested").join("state.json"));

        let mut state = GameState::default();
        state.rewards.stars = 12;
        state.progress.get_mut("wh").unwrap().explored = true;
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, state);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = LocalStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }
}
