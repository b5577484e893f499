//! Save slots on disk: one pretty-printed JSON file per slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use salvo_sim::SavedGame;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bad save data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Full save file written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub slot_name: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub seed: u64,
    pub game: SavedGame,
}

impl SaveFile {
    pub fn new(slot_name: &str, seed: u64, game: SavedGame) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            slot_name: slot_name.to_string(),
            timestamp,
            seed,
            game,
        }
    }
}

/// Lightweight listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub timestamp: u64,
    pub round: u16,
    pub total_rounds: u16,
    pub match_over: bool,
}

fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveFile) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let path = save_path(dir, slot);
    let json = serde_json::to_string_pretty(data).map_err(|source| PersistError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(io_error(&path))?;
    tracing::info!(path = %path.display(), "game saved");
    Ok(path)
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveFile, PersistError> {
    let path = save_path(dir, slot);
    let json = fs::read_to_string(&path).map_err(io_error(&path))?;
    let data = serde_json::from_str(&json).map_err(|source| PersistError::Json {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "game loaded");
    Ok(data)
}

/// Every readable save in `dir`, newest first. Unreadable files are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut saves: Vec<SaveMetadata> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| {
            let json = fs::read_to_string(&path).ok()?;
            match serde_json::from_str::<SaveFile>(&json) {
                Ok(data) => Some(SaveMetadata {
                    slot_name: data.slot_name,
                    timestamp: data.timestamp,
                    round: data.game.round,
                    total_rounds: data.game.total_rounds,
                    match_over: data.game.match_over,
                }),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable save");
                    None
                }
            }
        })
        .collect();
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.slot_name.cmp(&b.slot_name)));
    saves
}

/// Remove a slot. Deleting a slot that does not exist is not an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<(), PersistError> {
    let path = save_path(dir, slot);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(&path)(e)),
    }
}
