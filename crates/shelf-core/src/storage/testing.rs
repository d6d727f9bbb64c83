//! Test doubles for the backing store

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::error::{StoreError, StoreResult};
use super::kv::{KeyValueStore, MemoryStore};

/// A memory store that can be told to fail reads of given keys, or all writes
#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    inner: MemoryStore,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: AtomicBool,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_reads(&self, key: &str) {
        self.failing_reads.lock().unwrap().insert(key.to_string());
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.failing_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        if self.failing_reads.lock().unwrap().contains(key) {
            return Err(StoreError::Unavailable(format!("read of '{}' refused", key)));
        }
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("write of '{}' refused", key)));
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> StoreResult<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("removal of '{}' refused", key)));
        }
        self.inner.remove_item(key).await
    }
}

/// A memory store whose reads take a while, so concurrent callers interleave
#[derive(Debug, Default)]
pub(crate) struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowStore {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.inner.remove_item(key).await
    }
}
