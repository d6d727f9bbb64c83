//! Session-wide bookmark context
//!
//! The `BookmarkContext` holds the in-memory mirror of every bookmark and
//! category for one session and is the only API a frontend needs:
//!
//! - `load()` fills the mirror once from the storage adapter
//! - mutations go to the adapter first and patch the mirror only on success
//! - every change is published on a watch channel, so any number of
//!   subscribers can re-render against the new state
//!
//! ## Usage
//!
//! ```ignore
//! let context = BookmarkContext::from_adapter(LocalStorageAdapter::open(dir));
//! context.load().await;
//!
//! let reading = context.add_category(CategoryData::new("Reading")).await?;
//! let mut data = BookmarkData::new("https://example.com", "Example");
//! data.add_category(&reading.id);
//! context.add_bookmark(data).await?;
//! ```
//!
//! The context never serializes operations itself. Two mutations in flight
//! at once complete in whatever order the adapter resolves them.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{BookmarkError, BookmarkResult};
use crate::models::{
    Bookmark, BookmarkData, BookmarkPatch, Category, CategoryData, CategoryPatch, Draft, Entity,
};
use crate::query::{self, BookmarkFilter, SortOrder};
use crate::storage::{Edit, StorageAdapter};

/// Where the context is in its one-time load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// `load()` has not been called yet
    #[default]
    Uninitialized,
    /// Initial reads are in flight
    Loading,
    /// Mirror holds everything in storage
    Ready,
    /// Initial load failed; mirror is empty and `error` is set
    Failed,
}

/// Snapshot of everything a frontend renders from
#[derive(Debug, Clone, Default)]
pub struct ContextState {
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
    pub status: LoadStatus,
    /// Why the initial load failed
    pub error: Option<Arc<BookmarkError>>,
}

impl ContextState {
    /// True until the initial load has finished, successfully or not
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Uninitialized | LoadStatus::Loading)
    }

    /// True when the mirror is empty because storage is empty, not because loading failed
    pub fn is_empty(&self) -> bool {
        self.status == LoadStatus::Ready && self.bookmarks.is_empty() && self.categories.is_empty()
    }
}

/// Shared handle to the loaded bookmarks and categories
///
/// Cloning is cheap; all clones see and publish the same state.
#[derive(Clone)]
pub struct BookmarkContext {
    adapter: Arc<dyn StorageAdapter>,
    state: Arc<watch::Sender<ContextState>>,
}

impl BookmarkContext {
    /// Create a context over an injected adapter
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        let (state, _) = watch::channel(ContextState::default());
        Self {
            adapter,
            state: Arc::new(state),
        }
    }

    /// Create a context that owns its adapter
    pub fn from_adapter<A: StorageAdapter + 'static>(adapter: A) -> Self {
        Self::new(Arc::new(adapter))
    }

    /// Get the storage adapter
    pub fn adapter(&self) -> &Arc<dyn StorageAdapter> {
        &self.adapter
    }

    /// Read both collections and publish them as the mirror
    ///
    /// Both reads run concurrently. The context becomes `Ready` only if both
    /// succeed; otherwise it becomes `Failed` with empty collections and the
    /// error recorded in the state. The error is not returned.
    pub async fn load(&self) -> LoadStatus {
        self.state.send_modify(|state| {
            state.status = LoadStatus::Loading;
            state.error = None;
        });

        let (bookmarks, categories) = tokio::join!(
            self.adapter.list_bookmarks(),
            self.adapter.list_categories()
        );

        match (bookmarks, categories) {
            (Ok(bookmarks), Ok(categories)) => {
                info!(
                    "Loaded {} bookmark(s) and {} category(ies)",
                    bookmarks.len(),
                    categories.len()
                );
                self.state.send_replace(ContextState {
                    bookmarks,
                    categories,
                    status: LoadStatus::Ready,
                    error: None,
                });
                LoadStatus::Ready
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Initial load failed: {}", e);
                self.state.send_replace(ContextState {
                    status: LoadStatus::Failed,
                    error: Some(Arc::new(e)),
                    ..ContextState::default()
                });
                LoadStatus::Failed
            }
        }
    }

    // ==================== State ====================

    /// Clone of the current state
    pub fn state(&self) -> ContextState {
        self.state.borrow().clone()
    }

    /// Receive every future state change
    pub fn subscribe(&self) -> watch::Receiver<ContextState> {
        self.state.subscribe()
    }

    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// The initial load error, if any
    pub fn error(&self) -> Option<Arc<BookmarkError>> {
        self.state.borrow().error.clone()
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.state.borrow().bookmarks.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    /// Categories in display order (by `order`, then name)
    pub fn categories_sorted(&self) -> Vec<Category> {
        let mut categories = self.categories();
        categories.sort_by(|a, b| {
            a.data
                .order
                .cmp(&b.data.order)
                .then_with(|| a.data.name.to_lowercase().cmp(&b.data.name.to_lowercase()))
        });
        categories
    }

    /// Look up a bookmark in the mirror
    pub fn bookmark(&self, id: &str) -> Option<Bookmark> {
        self.state
            .borrow()
            .bookmarks
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Look up a category in the mirror
    pub fn category(&self, id: &str) -> Option<Category> {
        self.state
            .borrow()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Filter and sort the mirrored bookmarks
    pub fn find_bookmarks(&self, filter: &BookmarkFilter, order: SortOrder) -> Vec<Bookmark> {
        query::select(&self.state.borrow().bookmarks, filter, order)
    }

    /// Tags in use across the mirror, with counts
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        query::tag_counts(&self.state.borrow().bookmarks)
    }

    /// Number of mirrored bookmarks that reference a category
    pub fn bookmark_count_in(&self, category_id: &str) -> usize {
        self.state
            .borrow()
            .bookmarks
            .iter()
            .filter(|b| b.data.in_category(category_id))
            .count()
    }

    /// Order value for a category appended after the existing ones
    pub fn next_category_order(&self) -> i64 {
        self.state.borrow().categories.len() as i64
    }

    // ==================== Bookmark Operations ====================

    /// Create a bookmark and append it to the mirror
    pub async fn add_bookmark(&self, data: BookmarkData) -> BookmarkResult<Bookmark> {
        let bookmark = self.adapter.save_bookmark(Draft::new(data)).await?;
        debug!("Added bookmark {}", bookmark.id);
        self.state
            .send_modify(|state| state.bookmarks.push(bookmark.clone()));
        Ok(bookmark)
    }

    /// Apply a patch over the stored bookmark and save it
    ///
    /// Fields the patch leaves unset keep their stored values. Fails with
    /// `BookmarkNotFound` if no bookmark has this id.
    pub async fn update_bookmark(
        &self,
        id: &str,
        patch: BookmarkPatch,
    ) -> BookmarkResult<Bookmark> {
        self.modify_bookmark(id, move |data| patch.apply(data)).await
    }

    /// Delete a bookmark and drop it from the mirror
    pub async fn remove_bookmark(&self, id: &str) -> BookmarkResult<()> {
        self.adapter.delete_bookmark(id).await?;
        debug!("Removed bookmark {}", id);
        self.state
            .send_modify(|state| state.bookmarks.retain(|b| b.id != id));
        Ok(())
    }

    /// Count one more visit to a bookmark
    pub async fn record_visit(&self, id: &str) -> BookmarkResult<Bookmark> {
        self.modify_bookmark(id, |data| {
            data.visit_count = Some(data.visits().saturating_add(1));
        })
        .await
    }

    /// Archive or unarchive a bookmark
    pub async fn set_archived(&self, id: &str, archived: bool) -> BookmarkResult<Bookmark> {
        self.update_bookmark(id, BookmarkPatch::default().archived(archived))
            .await
    }

    async fn modify_bookmark(
        &self,
        id: &str,
        change: impl FnOnce(&mut BookmarkData) + Send + 'static,
    ) -> BookmarkResult<Bookmark> {
        let bookmark = self.adapter.update_bookmark(id, Box::new(change)).await?;
        debug!("Updated bookmark {}", bookmark.id);
        self.state
            .send_modify(|state| replace_by_id(&mut state.bookmarks, bookmark.clone()));
        Ok(bookmark)
    }

    // ==================== Category Operations ====================

    /// Create a category and append it to the mirror
    pub async fn add_category(&self, data: CategoryData) -> BookmarkResult<Category> {
        let category = self.adapter.save_category(Draft::new(data)).await?;
        debug!("Added category {}", category.id);
        self.state
            .send_modify(|state| state.categories.push(category.clone()));
        Ok(category)
    }

    /// Apply a patch over the stored category and save it
    ///
    /// Fails with `CategoryNotFound` if no category has this id.
    pub async fn update_category(
        &self,
        id: &str,
        patch: CategoryPatch,
    ) -> BookmarkResult<Category> {
        let edit: Edit<CategoryData> = Box::new(move |data| patch.apply(data));
        let category = self.adapter.update_category(id, edit).await?;
        debug!("Updated category {}", category.id);
        self.state
            .send_modify(|state| replace_by_id(&mut state.categories, category.clone()));
        Ok(category)
    }

    /// Delete a category and drop it from the mirror
    ///
    /// Fails with `CategoryHasBookmarks` while any bookmark references it.
    pub async fn remove_category(&self, id: &str) -> BookmarkResult<()> {
        self.adapter.delete_category(id).await?;
        debug!("Removed category {}", id);
        self.state
            .send_modify(|state| state.categories.retain(|c| c.id != id));
        Ok(())
    }
}

/// Replace the entry with the same id, or append if the mirror lacks it
fn replace_by_id<T>(records: &mut Vec<Entity<T>>, record: Entity<T>) {
    match records.iter_mut().find(|r| r.id == record.id) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ErrorCode;
    use crate::storage::testing::{FaultyStore, SlowStore};
    use crate::storage::{keys, KeyValueStore, LocalStorageAdapter};

    async fn ready_context() -> BookmarkContext {
        let context = BookmarkContext::from_adapter(LocalStorageAdapter::in_memory());
        assert_eq!(context.load().await, LoadStatus::Ready);
        context
    }

    #[tokio::test]
    async fn test_initial_state() {
        let context = BookmarkContext::from_adapter(LocalStorageAdapter::in_memory());
        let state = context.state();
        assert_eq!(state.status, LoadStatus::Uninitialized);
        assert!(state.is_loading());
        assert!(state.bookmarks.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_load_mirrors_storage_verbatim() {
        let adapter = Arc::new(LocalStorageAdapter::in_memory());
        let category = adapter
            .save_category(Draft::new(CategoryData::new("Reading")))
            .await
            .unwrap();
        let first = adapter
            .save_bookmark(Draft::new(BookmarkData::new("https://a.com", "A")))
            .await
            .unwrap();
        let second = adapter
            .save_bookmark(Draft::new(BookmarkData::new("https://b.com", "B")))
            .await
            .unwrap();

        let context = BookmarkContext::new(adapter.clone());
        assert_eq!(context.load().await, LoadStatus::Ready);

        let state = context.state();
        assert!(!state.is_loading());
        assert!(!state.is_empty());
        assert_eq!(state.bookmarks, vec![first, second]);
        assert_eq!(state.categories, vec![category]);
    }

    #[tokio::test]
    async fn test_empty_storage_is_ready_and_empty() {
        let context = ready_context().await;
        let state = context.state();
        assert!(state.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_nothing() {
        let adapter = Arc::new(LocalStorageAdapter::new(FaultyStore::new()));
        adapter
            .save_category(Draft::new(CategoryData::new("Reading")))
            .await
            .unwrap();
        adapter.store().fail_reads(keys::BOOKMARKS);

        let context = BookmarkContext::new(adapter.clone());
        assert_eq!(context.load().await, LoadStatus::Failed);

        let state = context.state();
        assert_eq!(state.status, LoadStatus::Failed);
        assert!(!state.is_loading());
        assert!(!state.is_empty());
        assert!(state.bookmarks.is_empty());
        // Categories would have loaded, but no partial mirror is kept
        assert!(state.categories.is_empty());
        let error = state.error.expect("load error recorded");
        assert_eq!(error.code(), ErrorCode::StorageReadError);
    }

    #[tokio::test]
    async fn test_reload_after_failure_recovers() {
        let adapter = Arc::new(LocalStorageAdapter::in_memory());
        adapter
            .store()
            .set_item(keys::CATEGORIES, "garbage")
            .await
            .unwrap();

        let context = BookmarkContext::new(adapter.clone());
        assert_eq!(context.load().await, LoadStatus::Failed);

        adapter.store().set_item(keys::CATEGORIES, "[]").await.unwrap();
        assert_eq!(context.load().await, LoadStatus::Ready);
        assert!(context.error().is_none());
    }

    #[tokio::test]
    async fn test_add_bookmark() {
        let context = ready_context().await;

        let bookmark = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        assert!(!bookmark.id.is_empty());
        assert_eq!(bookmark.created_at, bookmark.updated_at);

        let mirrored: Vec<_> = context
            .bookmarks()
            .into_iter()
            .filter(|b| b.id == bookmark.id)
            .collect();
        assert_eq!(mirrored.len(), 1);

        let stored = context.adapter().list_bookmarks().await.unwrap();
        assert_eq!(stored, vec![bookmark]);
    }

    #[tokio::test]
    async fn test_update_bookmark_merges_over_stored_record() {
        let context = ready_context().await;
        let mut data = BookmarkData::new("https://x.com", "X");
        data.add_tag("keep");
        data.description = Some("kept too".into());
        let created = context.add_bookmark(data).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = context
            .update_bookmark(&created.id, BookmarkPatch::default().title("Renamed"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.data.title, "Renamed");
        assert_eq!(updated.data.url, "https://x.com");
        assert_eq!(updated.data.tags, vec!["keep"]);
        assert_eq!(updated.data.description.as_deref(), Some("kept too"));

        assert_eq!(context.bookmarks(), vec![updated.clone()]);
        assert_eq!(context.bookmark(&created.id), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_bookmark_fails() {
        let context = ready_context().await;
        context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();
        let before = context.bookmarks();

        let err = context
            .update_bookmark("missing", BookmarkPatch::default().title("Y"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BookmarkNotFound);
        assert_eq!(context.bookmarks(), before);
        assert_eq!(context.adapter().list_bookmarks().await.unwrap(), before);
    }

    async fn slow_context() -> BookmarkContext {
        let adapter = LocalStorageAdapter::new(SlowStore::new(Duration::from_millis(5)));
        let context = BookmarkContext::from_adapter(adapter);
        assert_eq!(context.load().await, LoadStatus::Ready);
        context
    }

    async fn race_update_and_remove(update_first: bool) {
        let context = slow_context().await;
        let created = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        let update = context.update_bookmark(&created.id, BookmarkPatch::default().title("Y"));
        let remove = context.remove_bookmark(&created.id);
        let (updated, removed) = if update_first {
            tokio::join!(update, remove)
        } else {
            let (removed, updated) = tokio::join!(remove, update);
            (updated, removed)
        };

        removed.unwrap();
        match updated {
            Ok(bookmark) => assert_eq!(bookmark.id, created.id),
            Err(e) => assert_eq!(e.code(), ErrorCode::BookmarkNotFound),
        }

        // The removed record never comes back under a new id
        assert!(context.adapter().list_bookmarks().await.unwrap().is_empty());
        assert!(context.bookmarks().is_empty());
    }

    #[tokio::test]
    async fn test_update_racing_remove_never_recreates() {
        race_update_and_remove(true).await;
        race_update_and_remove(false).await;
    }

    #[tokio::test]
    async fn test_concurrent_patches_keep_both_fields() {
        let context = slow_context().await;
        let created = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            context.update_bookmark(&created.id, BookmarkPatch::default().title("Renamed")),
            context.update_bookmark(
                &created.id,
                BookmarkPatch::default().description(Some("described".into()))
            ),
        );
        first.unwrap();
        second.unwrap();

        let stored = context
            .adapter()
            .get_bookmark(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.data.title, "Renamed");
        assert_eq!(stored.data.description.as_deref(), Some("described"));
        assert_eq!(context.bookmark(&created.id), Some(stored));
    }

    #[tokio::test]
    async fn test_update_missing_category_fails() {
        let context = ready_context().await;

        let err = context
            .update_category("missing", CategoryPatch::default().order(3))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNotFound);
        assert!(context.categories().is_empty());
        assert!(context.adapter().list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_bookmark() {
        let context = ready_context().await;
        let bookmark = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        context.remove_bookmark(&bookmark.id).await.unwrap();
        assert!(context.bookmarks().is_empty());

        let err = context.remove_bookmark(&bookmark.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_mirror_untouched() {
        let adapter = Arc::new(LocalStorageAdapter::new(FaultyStore::new()));
        let context = BookmarkContext::new(adapter.clone());
        context.load().await;
        let existing = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        adapter.store().fail_writes(true);

        let err = context
            .add_bookmark(BookmarkData::new("https://y.com", "Y"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageWriteError);

        let err = context
            .update_bookmark(&existing.id, BookmarkPatch::default().title("Z"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageWriteError);

        let err = context.remove_bookmark(&existing.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageWriteError);

        let state = context.state();
        assert_eq!(state.bookmarks, vec![existing]);
        assert_eq!(state.status, LoadStatus::Ready);
        // Mutation errors go to the caller, not into the published state
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_reading_scenario() {
        let context = ready_context().await;

        let reading = context
            .add_category(CategoryData::new("Reading"))
            .await
            .unwrap();
        assert_eq!(reading.data.name, "Reading");
        assert_eq!(reading.data.order, 0);
        assert_eq!(reading.created_at, reading.updated_at);

        let mut data = BookmarkData::new("https://x.com", "X");
        data.category_ids = vec![reading.id.clone()];
        let bookmark = context.add_bookmark(data).await.unwrap();
        assert_eq!(bookmark.created_at, bookmark.updated_at);

        let err = context.remove_category(&reading.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryHasBookmarks);
        assert_eq!(context.categories().len(), 1);

        context.remove_bookmark(&bookmark.id).await.unwrap();
        context.remove_category(&reading.id).await.unwrap();

        assert!(context.categories().is_empty());
        assert!(context.adapter().list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_category() {
        let context = ready_context().await;
        let mut data = CategoryData::new("Reading");
        data.icon = Some("book".into());
        let created = context.add_category(data).await.unwrap();

        let updated = context
            .update_category(&created.id, CategoryPatch::default().name("Later").order(5))
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.data.name, "Later");
        assert_eq!(updated.data.order, 5);
        assert_eq!(updated.data.icon.as_deref(), Some("book"));
        assert_eq!(context.category(&created.id), Some(updated));

        let err = context
            .update_category("missing", CategoryPatch::default().name("X"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn test_subscribers_see_mutations() {
        let context = ready_context().await;
        let mut rx = context.subscribe();
        rx.borrow_and_update();

        let bookmark = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().bookmarks, vec![bookmark]);

        // A failed mutation publishes nothing
        let _ = context.remove_bookmark("missing").await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let context = ready_context().await;
        let other = context.clone();

        other
            .add_category(CategoryData::new("Shared"))
            .await
            .unwrap();
        assert_eq!(context.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_record_visit_and_archive() {
        let context = ready_context().await;
        let bookmark = context
            .add_bookmark(BookmarkData::new("https://x.com", "X"))
            .await
            .unwrap();

        context.record_visit(&bookmark.id).await.unwrap();
        let visited = context.record_visit(&bookmark.id).await.unwrap();
        assert_eq!(visited.data.visit_count, Some(2));

        let archived = context.set_archived(&bookmark.id, true).await.unwrap();
        assert!(archived.data.is_archived());
        assert_eq!(archived.data.visit_count, Some(2));

        let err = context.record_visit("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_queries_over_mirror() {
        let context = ready_context().await;
        let reading = context
            .add_category(CategoryData::new("Reading").with_order(1))
            .await
            .unwrap();
        context
            .add_category(CategoryData::new("Archive").with_order(0))
            .await
            .unwrap();
        assert_eq!(context.next_category_order(), 2);
        let sorted: Vec<_> = context
            .categories_sorted()
            .into_iter()
            .map(|c| c.data.name)
            .collect();
        assert_eq!(sorted, vec!["Archive", "Reading"]);

        let mut rust = BookmarkData::new("https://rust-lang.org", "Rust");
        rust.add_tag("lang");
        rust.add_category(&reading.id);
        context.add_bookmark(rust).await.unwrap();

        let mut go = BookmarkData::new("https://go.dev", "Go");
        go.add_tag("lang");
        go.add_tag("google");
        context.add_bookmark(go).await.unwrap();

        let filter = BookmarkFilter {
            category_id: Some(reading.id.clone()),
            ..Default::default()
        };
        let found = context.find_bookmarks(&filter, SortOrder::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data.title, "Rust");
        assert_eq!(context.bookmark_count_in(&reading.id), 1);

        assert_eq!(
            context.tag_counts(),
            vec![("google".to_string(), 1), ("lang".to_string(), 2)]
        );
    }
}
