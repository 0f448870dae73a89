//! Snapshot cache
//!
//! Remembers the last remote snapshot that downloaded and verified correctly,
//! so a later launch without network still shows the newest park data instead
//! of the bundled copy. Values sit behind the [`StorageBackend`] trait;
//! [`FileStorage`] keeps them in one JSON file in the per-user cache directory.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Platform storage error: {0}")]
    Platform(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Simple generic storage backend trait.
///
/// Keys and values are UTF-8 strings. Structured values go through
/// [`save_json_backend`] and [`load_json_backend`].
pub trait StorageBackend: Send + Sync {
    /// Store a string value for a key.
    fn set_string(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read a string value for a key. Returns Ok(None) when key is missing.
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Remove a key (no-op if key does not exist).
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// All stored keys.
    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(Vec::new())
    }
}

pub fn save_json_backend<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let s = serde_json::to_string(value).map_err(|e| StorageError::Json(e.to_string()))?;
    backend.set_string(key, &s)
}

pub fn load_json_backend<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> StorageResult<Option<T>> {
    match backend.get_string(key)? {
        Some(s) => serde_json::from_str::<T>(&s)
            .map(Some)
            .map_err(|e| StorageError::Json(e.to_string())),
        None => Ok(None),
    }
}

/// Raw park files from a verified remote download
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub data: String,
    pub categories: String,
    pub data_sha256: String,
    pub categories_sha256: String,
}

fn snapshot_key(platform: &str, location: &str) -> String {
    format!("snapshot/{}/{}", platform, location)
}

/// Remember a verified snapshot for a platform/location pair
pub fn store_snapshot(
    backend: &dyn StorageBackend,
    platform: &str,
    location: &str,
    snapshot: &CachedSnapshot,
) -> StorageResult<()> {
    save_json_backend(backend, &snapshot_key(platform, location), snapshot)
}

/// Last verified snapshot for a platform/location pair, if any
pub fn load_snapshot(
    backend: &dyn StorageBackend,
    platform: &str,
    location: &str,
) -> StorageResult<Option<CachedSnapshot>> {
    load_json_backend(backend, &snapshot_key(platform, location))
}

/// Default location of the snapshot cache file
///
/// `$XDG_CACHE_HOME/park-guide/snapshots.json`, else
/// `$HOME/.cache/park-guide/snapshots.json`, else the working directory.
pub fn default_cache_path() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".cache")));
    match base {
        Some(dir) => dir.join("park-guide").join("snapshots.json"),
        None => PathBuf::from("park-guide-snapshots.json"),
    }
}

/// Snapshot cache kept as one JSON object of string entries
///
/// Entries live in memory behind a mutex. Every change rewrites the file
/// through a sibling temporary file and a rename, so a crash mid-write leaves
/// the previous cache intact. An unreadable cache file is discarded.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable cache {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        tracing::debug!("Snapshot cache {} ({} entries)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn open_default() -> StorageResult<Self> {
        Self::open(default_cache_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to the entries and persist the result
    fn update<F>(&self, change: F) -> StorageResult<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Platform("cache lock poisoned".to_string()))?;
        change(&mut entries);
        self.persist(&entries)
    }

    fn persist(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .map_err(|e| StorageError::Io(format!("cannot create {}: {}", dir.display(), e)))?;
        }
        let text =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Json(e.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, text)
            .and_then(|()| fs::rename(&staging, &self.path))
            .map_err(|e| StorageError::Io(format!("cannot write {}: {}", self.path.display(), e)))
    }
}

impl StorageBackend for FileStorage {
    fn set_string(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Platform("cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Platform("cache lock poisoned".to_string()))?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Open the snapshot cache at `path`, or at [`default_cache_path`]
pub fn open_backend(path: Option<PathBuf>) -> StorageResult<Box<dyn StorageBackend>> {
    let storage = match path {
        Some(path) => FileStorage::open(path)?,
        None => FileStorage::open_default()?,
    };
    Ok(Box::new(storage))
}
