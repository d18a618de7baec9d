use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::LinkStore;

/// In-memory store backed by a sharded concurrent map.
///
/// Lives as long as the process; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn contains(&self, code: &str) -> bool {
        self.inner.contains_key(code)
    }

    async fn put(&self, code: &str, url: &str) {
        self.inner.insert(code.to_owned(), url.to_owned());
    }

    async fn insert_if_absent(&self, code: &str, url: &str) -> bool {
        // entry() 持有分片写锁，检查与插入在同一临界区内完成
        match self.inner.entry(code.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                true
            }
        }
    }

    async fn get(&self, code: &str) -> Option<String> {
        self.inner.get(code).map(|entry| entry.value().clone())
    }

    async fn all(&self) -> BTreeMap<String, String> {
        self.inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    async fn remove(&self, code: &str) -> bool {
        self.inner.remove(code).is_some()
    }

    async fn len(&self) -> usize {
        self.inner.len()
    }
}
