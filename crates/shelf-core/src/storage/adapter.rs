//! Storage adapter interface
//!
//! The only component that touches the backing store. Callers (the
//! bookmark context, tests, alternate frontends) depend on this trait, so
//! the persistence mechanism can be swapped without touching them.

use async_trait::async_trait;

use crate::error::BookmarkResult;
use crate::models::{Bookmark, BookmarkData, Category, CategoryData, Draft};

/// In-place change to a stored payload, applied under the collection lock
pub type Edit<T> = Box<dyn FnOnce(&mut T) + Send>;

/// CRUD over the bookmark and category collections
///
/// All operations are async: the local store happens to be fast, but a
/// remote backend would not be.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// All bookmarks in stored order; empty if none were ever saved
    async fn list_bookmarks(&self) -> BookmarkResult<Vec<Bookmark>>;

    /// The bookmark with this id, or `None`
    async fn get_bookmark(&self, id: &str) -> BookmarkResult<Option<Bookmark>>;

    /// Upsert a bookmark and return it as persisted
    ///
    /// A draft without an id, or with an id no bookmark has, creates a new
    /// bookmark with a fresh id and `created_at == updated_at`. A known id
    /// keeps `created_at`, bumps `updated_at` and replaces every other field.
    /// Fails with `CategoryNotFound` if the draft adds a category id that
    /// no stored category has.
    async fn save_bookmark(&self, draft: Draft<BookmarkData>) -> BookmarkResult<Bookmark>;

    /// Change a stored bookmark in place and return it as persisted
    ///
    /// Fails with `BookmarkNotFound` if absent; never creates.
    async fn update_bookmark(
        &self,
        id: &str,
        edit: Edit<BookmarkData>,
    ) -> BookmarkResult<Bookmark>;

    /// Remove a bookmark; fails with `BookmarkNotFound` if absent
    async fn delete_bookmark(&self, id: &str) -> BookmarkResult<()>;

    /// All categories in stored order; empty if none were ever saved
    async fn list_categories(&self) -> BookmarkResult<Vec<Category>>;

    /// The category with this id, or `None`
    async fn get_category(&self, id: &str) -> BookmarkResult<Option<Category>>;

    /// Upsert a category and return it as persisted (same rules as bookmarks)
    async fn save_category(&self, draft: Draft<CategoryData>) -> BookmarkResult<Category>;

    /// Change a stored category in place; fails with `CategoryNotFound` if absent
    async fn update_category(
        &self,
        id: &str,
        edit: Edit<CategoryData>,
    ) -> BookmarkResult<Category>;

    /// Remove a category
    ///
    /// Fails with `CategoryNotFound` if absent and with
    /// `CategoryHasBookmarks` while any bookmark lists it in `category_ids`.
    /// Never cascades.
    async fn delete_category(&self, id: &str) -> BookmarkResult<()>;
}
