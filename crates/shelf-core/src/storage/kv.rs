//! String-keyed backing stores
//!
//! The storage adapter persists each entity collection as one JSON string
//! under a fixed key. This module provides the stores it can sit on:
//!
//! - [`MemoryStore`]: process-local map, for tests and throwaway sessions
//! - [`FileStore`]: one `<key>.json` file per key under a data directory,
//!   written atomically (temp file, sync, rename)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::error::{StoreError, StoreResult};

/// A string-keyed store of string values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`; `None` if it was never written
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// In-memory key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// File-backed key/value store
///
/// Storage location: `~/.local/share/shelf/` by default (see `Config`).
/// Each key maps to `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the store's files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Total size in bytes of the given keys' files (missing files count as 0)
    pub async fn size_of(&self, keys: &[&str]) -> StoreResult<u64> {
        let mut total = 0;
        for key in keys {
            let path = self.path_for(key)?;
            match fs::metadata(&path).await {
                Ok(meta) => total += meta.len(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::from_read(e, path)),
            }
        }
        Ok(total)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::from_read(e, path)),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes()).await
    }

    async fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::from_write(e, path)),
        }
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The target file is never left in a partially-written state.
async fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| StoreError::from_write(e, temp_path.clone()))?;

    file.write_all(data)
        .await
        .map_err(|e| StoreError::from_write(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .await
        .map_err(|e| StoreError::from_write(e, temp_path.clone()))?;
    drop(file);

    fs::rename(&temp_path, path)
        .await
        .map_err(|source| StoreError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        })?;

    Ok(())
}
