//! Key/value storage adapter
//!
//! Persists each collection as a JSON array under a fixed key:
//!
//! - `bookmarks` - every Bookmark record
//! - `categories` - every Category record
//!
//! Mutations read the whole collection, change it and write it back. Each
//! collection has its own async mutex held across that read-modify-write,
//! so overlapping writers cannot drop each other's changes. When both are
//! needed the bookmarks lock is always taken first.
//!
//! An emptied collection is removed from the store rather than written as
//! `[]`; both read back as an empty list.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::adapter::{Edit, StorageAdapter};
use super::kv::{FileStore, KeyValueStore, MemoryStore};
use crate::error::{BookmarkError, BookmarkResult};
use crate::models::{Bookmark, BookmarkData, Category, CategoryData, Draft, Entity};

/// Keys used in the backing store
pub mod keys {
    pub const BOOKMARKS: &str = "bookmarks";
    pub const CATEGORIES: &str = "categories";
}

/// Storage adapter over any string-keyed store
pub struct LocalStorageAdapter<S> {
    store: S,
    bookmarks_lock: Mutex<()>,
    categories_lock: Mutex<()>,
}

impl<S: KeyValueStore> LocalStorageAdapter<S> {
    /// Create an adapter over the given store
    pub fn new(store: S) -> Self {
        Self {
            store,
            bookmarks_lock: Mutex::new(()),
            categories_lock: Mutex::new(()),
        }
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> BookmarkResult<Vec<Entity<T>>> {
        let raw = self.store.get_item(key).await.map_err(|e| {
            warn!("Failed to read {} from storage: {}", key, e);
            BookmarkError::read(key, e)
        })?;

        match raw {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| {
                warn!("Stored {} are not valid JSON: {}", key, e);
                BookmarkError::read(key, e)
            }),
            _ => Ok(Vec::new()),
        }
    }

    async fn write_collection<T: Serialize + Sync>(
        &self,
        key: &str,
        records: &[Entity<T>],
    ) -> BookmarkResult<()> {
        let result = if records.is_empty() {
            self.store.remove_item(key).await
        } else {
            let json =
                serde_json::to_string(records).map_err(|e| BookmarkError::write(key, e))?;
            self.store.set_item(key, &json).await
        };
        result.map_err(|e| {
            warn!("Failed to write {} to storage: {}", key, e);
            BookmarkError::write(key, e)
        })
    }

    /// Reject category ids the bookmark gains that no stored category has
    ///
    /// Ids it already carried are left alone. Callers hold the bookmarks
    /// lock, which keeps `delete_category` out until the save is written.
    async fn check_categories(
        &self,
        data: &BookmarkData,
        previous: &[String],
    ) -> BookmarkResult<()> {
        let added: Vec<&String> = data
            .category_ids
            .iter()
            .filter(|id| !previous.contains(id))
            .collect();
        if added.is_empty() {
            return Ok(());
        }

        let categories: Vec<Category> = self.read_collection(keys::CATEGORIES).await?;
        match added.into_iter().find(|id| find(&categories, id).is_none()) {
            Some(missing) => Err(BookmarkError::CategoryNotFound(missing.clone())),
            None => Ok(()),
        }
    }
}

impl LocalStorageAdapter<MemoryStore> {
    /// Adapter over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl LocalStorageAdapter<FileStore> {
    /// Adapter over a file store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }
}

/// Insert or replace a record, returning it as it will be persisted
fn upsert<T: Clone>(records: &mut Vec<Entity<T>>, draft: Draft<T>, now: DateTime<Utc>) -> Entity<T> {
    let existing = draft
        .id
        .as_deref()
        .and_then(|id| records.iter().position(|r| r.id == id));

    match existing {
        Some(index) => {
            let record = &mut records[index];
            record.data = draft.data;
            record.updated_at = now.max(record.updated_at);
            record.clone()
        }
        None => {
            let record = Entity::create(draft.data, now);
            records.push(record.clone());
            record
        }
    }
}

fn find<'a, T>(records: &'a [Entity<T>], id: &str) -> Option<&'a Entity<T>> {
    records.iter().find(|r| r.id == id)
}

#[async_trait]
impl<S: KeyValueStore> StorageAdapter for LocalStorageAdapter<S> {
    async fn list_bookmarks(&self) -> BookmarkResult<Vec<Bookmark>> {
        self.read_collection(keys::BOOKMARKS).await
    }

    async fn get_bookmark(&self, id: &str) -> BookmarkResult<Option<Bookmark>> {
        let bookmarks: Vec<Bookmark> = self.read_collection(keys::BOOKMARKS).await?;
        Ok(find(&bookmarks, id).cloned())
    }

    async fn save_bookmark(&self, mut draft: Draft<BookmarkData>) -> BookmarkResult<Bookmark> {
        draft.data.normalize();

        let _guard = self.bookmarks_lock.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_collection(keys::BOOKMARKS).await?;

        let previous = draft
            .id
            .as_deref()
            .and_then(|id| find(&bookmarks, id))
            .map(|b| b.data.category_ids.clone())
            .unwrap_or_default();
        self.check_categories(&draft.data, &previous).await?;

        let saved = upsert(&mut bookmarks, draft, Utc::now());
        self.write_collection(keys::BOOKMARKS, &bookmarks).await?;

        debug!("Saved bookmark {} ({})", saved.id, saved.data.url);
        Ok(saved)
    }

    async fn update_bookmark(
        &self,
        id: &str,
        edit: Edit<BookmarkData>,
    ) -> BookmarkResult<Bookmark> {
        let _guard = self.bookmarks_lock.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_collection(keys::BOOKMARKS).await?;

        let current = find(&bookmarks, id)
            .ok_or_else(|| BookmarkError::BookmarkNotFound(id.to_string()))?;
        let mut data = current.data.clone();
        edit(&mut data);
        data.normalize();
        self.check_categories(&data, &current.data.category_ids).await?;

        let saved = upsert(&mut bookmarks, Draft::with_id(id, data), Utc::now());
        self.write_collection(keys::BOOKMARKS, &bookmarks).await?;

        debug!("Updated bookmark {}", saved.id);
        Ok(saved)
    }

    async fn delete_bookmark(&self, id: &str) -> BookmarkResult<()> {
        let _guard = self.bookmarks_lock.lock().await;
        let mut bookmarks: Vec<Bookmark> = self.read_collection(keys::BOOKMARKS).await?;

        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);
        if bookmarks.len() == before {
            return Err(BookmarkError::BookmarkNotFound(id.to_string()));
        }

        self.write_collection(keys::BOOKMARKS, &bookmarks).await?;
        debug!("Deleted bookmark {}", id);
        Ok(())
    }

    async fn list_categories(&self) -> BookmarkResult<Vec<Category>> {
        self.read_collection(keys::CATEGORIES).await
    }

    async fn get_category(&self, id: &str) -> BookmarkResult<Option<Category>> {
        let categories: Vec<Category> = self.read_collection(keys::CATEGORIES).await?;
        Ok(find(&categories, id).cloned())
    }

    async fn save_category(&self, draft: Draft<CategoryData>) -> BookmarkResult<Category> {
        let _guard = self.categories_lock.lock().await;
        let mut categories: Vec<Category> = self.read_collection(keys::CATEGORIES).await?;
        let saved = upsert(&mut categories, draft, Utc::now());
        self.write_collection(keys::CATEGORIES, &categories).await?;

        debug!("Saved category {} ({})", saved.id, saved.data.name);
        Ok(saved)
    }

    async fn update_category(
        &self,
        id: &str,
        edit: Edit<CategoryData>,
    ) -> BookmarkResult<Category> {
        let _guard = self.categories_lock.lock().await;
        let mut categories: Vec<Category> = self.read_collection(keys::CATEGORIES).await?;

        let mut data = find(&categories, id)
            .ok_or_else(|| BookmarkError::CategoryNotFound(id.to_string()))?
            .data
            .clone();
        edit(&mut data);

        let saved = upsert(&mut categories, Draft::with_id(id, data), Utc::now());
        self.write_collection(keys::CATEGORIES, &categories).await?;

        debug!("Updated category {}", saved.id);
        Ok(saved)
    }

    async fn delete_category(&self, id: &str) -> BookmarkResult<()> {
        // Hold both locks so no bookmark can start referencing the category
        // between the dependent check and the write.
        let _bookmarks_guard = self.bookmarks_lock.lock().await;
        let _categories_guard = self.categories_lock.lock().await;

        let mut categories: Vec<Category> = self.read_collection(keys::CATEGORIES).await?;
        if find(&categories, id).is_none() {
            return Err(BookmarkError::CategoryNotFound(id.to_string()));
        }

        let bookmarks: Vec<Bookmark> = self.read_collection(keys::BOOKMARKS).await?;
        let dependents = bookmarks.iter().filter(|b| b.data.in_category(id)).count();
        if dependents > 0 {
            return Err(BookmarkError::CategoryHasBookmarks {
                id: id.to_string(),
                count: dependents,
            });
        }

        categories.retain(|c| c.id != id);
        self.write_collection(keys::CATEGORIES, &categories).await?;
        debug!("Deleted category {}", id);
        Ok(())
    }
}
