//! Preferences store and JSON file helpers.
//!
//! Files live in the platform config directory resolved through
//! `directories::ProjectDirs`. The preferences file carries a SHA-256
//! checksum over its entries; a missing, unreadable or tampered file loads
//! as an empty store.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::core::constants::PREFS_FILE_NAME;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("checksum verification failed for {0}")]
    ChecksumMismatch(PathBuf),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// The config directory, created if needed.
pub fn config_dir() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("", "", "magic-survivors").ok_or(PersistenceError::NoConfigDir)?;
    let dir = project_dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path(filename: &str) -> Result<PathBuf> {
    Ok(config_dir()?.join(filename))
}

/// Loads JSON from `path`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid JSON, using defaults");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Saves a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    entries: BTreeMap<String, u64>,
    checksum: String,
}

fn checksum(entries: &BTreeMap<String, u64>) -> String {
    let mut hasher = Sha256::new();
    for (key, value) in entries {
        hasher.update(key.as_bytes());
        hasher.update([0u8]);
        hasher.update(value.to_le_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Flat key/value store for persistent integers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefsStore {
    /// `None` for a store that never touches disk.
    path: Option<PathBuf>,
    entries: BTreeMap<String, u64>,
}

impl PrefsStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store in the platform config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(config_path(PREFS_FILE_NAME)?))
    }

    /// Opens the store at `path`. Any load failure yields an empty store
    /// that will overwrite the file on the next save.
    pub fn open(path: PathBuf) -> Self {
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(PersistenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preferences unreadable, starting fresh");
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path),
            entries,
        }
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, u64>> {
        let json = fs::read_to_string(path)?;
        let file: PrefsFile = serde_json::from_str(&json)?;
        if checksum(&file.entries) != file.checksum {
            return Err(PersistenceError::ChecksumMismatch(path.to_path_buf()));
        }
        Ok(file.entries)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: u64) -> u64 {
        self.get(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: u64) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every entry with a fresh checksum. No-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = PrefsFile {
            checksum: checksum(&self.entries),
            entries: self.entries.clone(),
        };
        save_json(path, &file)
    }
}
