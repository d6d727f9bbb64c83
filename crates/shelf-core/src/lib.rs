//! SHELF Core Library
//!
//! This crate provides the persistence and domain-context layer for SHELF,
//! a local bookmark manager: bookmarks grouped into categories, tagged, and
//! browsed from a frontend that never touches storage directly.
//!
//! # Architecture
//!
//! - **Storage adapter**: entity-level CRUD over a string-keyed store, with
//!   referential integrity between categories and bookmarks
//! - **Context**: one shared in-memory mirror per session, patched after
//!   every successful mutation and published to subscribers
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let context = BookmarkContext::from_adapter(config.storage_adapter());
//! context.load().await;
//!
//! let bookmark = context
//!     .add_bookmark(BookmarkData::new("https://example.com", "Example"))
//!     .await?;
//! let all = context.bookmarks();
//! ```
//!
//! # Modules
//!
//! - `context`: Session state and mutation API (main entry point)
//! - `models`: Bookmarks, categories, drafts and patches
//! - `storage`: Adapter trait, local adapter and backing stores
//! - `query`: Filtering, sorting and tag counts
//! - `error`: Error taxonomy
//! - `config`: Application configuration

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;

pub use config::Config;
pub use context::{BookmarkContext, ContextState, LoadStatus};
pub use error::{BookmarkError, BookmarkResult, ErrorCode};
pub use models::{
    Bookmark, BookmarkData, BookmarkMetadata, BookmarkPatch, Category, CategoryData,
    CategoryPatch, Draft, Entity,
};
pub use query::{BookmarkFilter, SortDirection, SortKey, SortOrder};
pub use storage::{
    FileStore, KeyValueStore, LocalStorageAdapter, MemoryStore, StorageAdapter, StoreError,
};
