use std::{collections::HashMap, fmt::Debug, hash::Hash};

use tokio::sync::RwLock;

#[macro_use]
pub mod macros;

/// In-memory cache living as long as the process.
///
/// Entries are filled on first successful use and never expire; only
/// [`CatalogCache::clear`] removes them.
#[derive(Debug)]
pub struct CatalogCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for CatalogCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> CatalogCache<K, V>
where
    K: Eq + Hash + Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let value = self.entries.read().await.get(key).cloned();
        match value {
            Some(_) => tracing::debug!(key = ?key, "Cache hit"),
            None => tracing::debug!(key = ?key, "Cache miss"),
        }
        value
    }

    /// Stores a value; a concurrent fill of the same key keeps the last write
    pub async fn insert(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
        tracing::debug!("Cache cleared");
    }
}
