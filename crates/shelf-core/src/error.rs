//! Domain error taxonomy
//!
//! Every failure surfaced by the storage adapter or the context is a
//! [`BookmarkError`]. Each variant maps to a machine-readable [`ErrorCode`];
//! storage faults also carry the underlying cause, reachable through
//! [`std::error::Error::source`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

/// Boxed underlying cause of a storage fault
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    StorageReadError,
    StorageWriteError,
    BookmarkNotFound,
    CategoryNotFound,
    CategoryHasBookmarks,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StorageReadError => "STORAGE_READ_ERROR",
            ErrorCode::StorageWriteError => "STORAGE_WRITE_ERROR",
            ErrorCode::BookmarkNotFound => "BOOKMARK_NOT_FOUND",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
            ErrorCode::CategoryHasBookmarks => "CATEGORY_HAS_BOOKMARKS",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the storage adapter and the bookmark context
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// A collection could not be read or parsed
    #[error("Failed to retrieve data from storage: {key}")]
    StorageRead {
        key: String,
        #[source]
        source: BoxError,
    },

    /// A collection could not be written
    #[error("Failed to save data to storage: {key}")]
    StorageWrite {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Category deletion blocked by referencing bookmarks
    #[error("Cannot delete category with existing bookmarks: {id} ({count} bookmark(s))")]
    CategoryHasBookmarks { id: String, count: usize },
}

impl BookmarkError {
    pub(crate) fn read(key: &str, source: impl Into<BoxError>) -> Self {
        BookmarkError::StorageRead {
            key: key.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn write(key: &str, source: impl Into<BoxError>) -> Self {
        BookmarkError::StorageWrite {
            key: key.to_string(),
            source: source.into(),
        }
    }

    /// The machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            BookmarkError::StorageRead { .. } => ErrorCode::StorageReadError,
            BookmarkError::StorageWrite { .. } => ErrorCode::StorageWriteError,
            BookmarkError::BookmarkNotFound(_) => ErrorCode::BookmarkNotFound,
            BookmarkError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            BookmarkError::CategoryHasBookmarks { .. } => ErrorCode::CategoryHasBookmarks,
        }
    }

    /// True for either entity-absent error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BookmarkError::BookmarkNotFound(_) | BookmarkError::CategoryNotFound(_)
        )
    }

    /// The backing store error behind a storage fault, if that is the cause
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            BookmarkError::StorageRead { source, .. } | BookmarkError::StorageWrite { source, .. } => {
                source.downcast_ref::<StoreError>()
            }
            _ => None,
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            BookmarkError::CategoryHasBookmarks { .. } => {
                Some("Move or delete the bookmarks in this category first.")
            }
            BookmarkError::StorageRead { .. } | BookmarkError::StorageWrite { .. } => self
                .store_error()
                .and_then(StoreError::recovery_suggestion),
            _ => None,
        }
    }
}

/// Result type for adapter and context operations
pub type BookmarkResult<T> = Result<T, BookmarkError>;
