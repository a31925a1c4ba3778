//! Highscore storage.
//!
//! Storage is best-effort: a missing or unreadable save file reads as a
//! highscore of zero, and a failed write is logged and forgotten. Nothing
//! here can stop the game loop.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SAVE_PATH: &str = "snake_save.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode save data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Collaborator that remembers the best score between sessions.
pub trait HighscoreStore {
    /// Stored highscore, 0 when there is none or it cannot be read.
    fn load(&self) -> u32;
    /// Best-effort write; failures are swallowed.
    fn save(&mut self, highscore: u32);
}

/// The player's sound volume, kept beside the highscore.
pub trait VolumeStore {
    /// Stored volume in 0..=1, full volume when unknown.
    fn load_volume(&self) -> f32;
    fn save_volume(&mut self, volume: f32);
}

fn default_volume() -> f32 {
    1.0
}

/// On-disk layout of the save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub best_score: u32,
    #[serde(default = "default_volume")]
    pub sound_volume: f32,
}

impl Default for SaveData {
    fn default() -> Self {
        Self { best_score: 0, sound_volume: default_volume() }
    }
}

/// JSON save file next to the binary (or wherever the config points).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole save file. A missing file is not an error.
    pub fn read(&self) -> Result<SaveData, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SaveData::default()),
            Err(source) => return Err(PersistenceError::Read { path: self.path.clone(), source }),
        };
        serde_json::from_str(&text).map_err(|source| PersistenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn write(&self, data: &SaveData) -> Result<(), PersistenceError> {
        let text = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, text).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn update(&self, apply: impl FnOnce(&mut SaveData)) {
        // A corrupt file is replaced rather than blocking every later save.
        let mut data = self.read().unwrap_or_else(|e| {
            log::warn!("{e}; starting a fresh save file");
            SaveData::default()
        });
        apply(&mut data);
        match self.write(&data) {
            Ok(()) => log::debug!("saved {:?} to {}", data, self.path.display()),
            Err(e) => log::warn!("{e}"),
        }
    }
}

impl HighscoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        match self.read() {
            Ok(data) => data.best_score,
            Err(e) => {
                log::warn!("{e}; highscore starts at 0");
                0
            }
        }
    }

    fn save(&mut self, highscore: u32) {
        self.update(|d| d.best_score = highscore);
    }
}

impl VolumeStore for JsonFileStore {
    fn load_volume(&self) -> f32 {
        match self.read() {
            Ok(data) => data.sound_volume.clamp(0.0, 1.0),
            Err(e) => {
                log::warn!("{e}");
                default_volume()
            }
        }
    }

    fn save_volume(&mut self, volume: f32) {
        self.update(|d| d.sound_volume = volume.clamp(0.0, 1.0));
    }
}

/// Keeps the highscore and volume in memory only.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pub best: u32,
    /// Number of highscore saves.
    pub writes: usize,
    pub volume: f32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self { best: 0, writes: 0, volume: default_volume() }
    }
}

impl VolumeStore for MemoryStore {
    fn load_volume(&self) -> f32 {
        self.volume
    }

    fn save_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

impl HighscoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, highscore: u32) {
        self.best = highscore;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load(), 0);
        assert_eq!(store.load_volume(), 1.0);
    }

    #[test]
    fn highscore_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let mut store = JsonFileStore::new(&path);
        store.save(42);
        assert_eq!(JsonFileStore::new(&path).load(), 42);
    }

    #[test]
    fn saving_highscore_keeps_volume() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("save.json"));
        store.save_volume(0.25);
        store.save(3);
        let data = store.read().unwrap();
        assert_eq!(data, SaveData { best_score: 3, sound_volume: 0.25 });
    }

    #[test]
    fn corrupt_file_reads_as_zero_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.read(), Err(PersistenceError::Parse { .. })));
        assert_eq!(store.load(), 0);
        store.save(5);
        assert_eq!(store.load(), 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, r#"{ "best_score": 9 }"#).unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(store.read().unwrap(), SaveData { best_score: 9, sound_volume: 1.0 });
    }

    #[test]
    fn unwritable_path_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let mut store = JsonFileStore::new(dir.path());
        store.save(7);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::default();
        store.save(4);
        store.save(6);
        assert_eq!(store.load(), 6);
        assert_eq!(store.writes, 2);
    }
}
