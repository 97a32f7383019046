// Named Object Storage
//
// Shared cache keyed by connection name, used once for live SQL
// handles and once for pooled datasources. Purely presence-based: no
// TTL, no eviction, no capacity bound. Every entry is removed
// explicitly by its owning factory/handler.

use std::collections::HashMap;
use tokio::sync::RwLock;

pub struct Storage<T: Clone> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> Storage<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, name: &str) -> Option<T> {
        self.entries.read().await.get(name).cloned()
    }

    /// Insert or silently overwrite
    pub async fn set(&self, name: &str, value: T) {
        self.entries.write().await.insert(name.to_string(), value);
    }

    /// Remove an entry; a no-op if absent
    pub async fn remove(&self, name: &str) -> Option<T> {
        self.entries.write().await.remove(name)
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    /// Read-only introspection: currently stored names, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Clone> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}
