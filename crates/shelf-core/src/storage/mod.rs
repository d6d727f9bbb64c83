//! Storage layer
//!
//! Handles persistence of bookmarks and categories.
//!
//! ## Architecture
//!
//! - **Adapter** (`StorageAdapter`): entity-level CRUD, the only API the
//!   rest of the crate uses
//! - **Backing store** (`KeyValueStore`): string-keyed storage the adapter
//!   writes whole collections into, in memory or on disk
//!
//! Swapping the backing store (or the whole adapter) does not touch callers.

pub mod adapter;
pub mod error;
pub mod kv;
pub mod local;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{Edit, StorageAdapter};
pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use local::{keys, LocalStorageAdapter};
