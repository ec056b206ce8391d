use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::batch::WriteBatch;
use crate::error::PackResult;
use crate::traits::NamespaceStore;

type Namespace = BTreeMap<String, String>;

/// In-memory, BTreeMap-based namespace store.
///
/// Intended for tests and embedding. Each namespace is a sorted map, so
/// iteration order matches the on-disk backend. Values are cloned on
/// read/write.
pub struct InMemoryNamespaceStore {
    namespaces: RwLock<BTreeMap<String, Namespace>>,
}

impl InMemoryNamespaceStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of entries in a namespace.
    pub fn len(&self, namespace: &str) -> usize {
        self.namespaces
            .read()
            .expect("lock poisoned")
            .get(namespace)
            .map_or(0, BTreeMap::len)
    }

    /// Names of all namespaces written so far, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        self.namespaces
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Remove one entry. Returns `true` if it existed.
    pub fn remove(&self, namespace: &str, key: &str) -> bool {
        self.namespaces
            .write()
            .expect("lock poisoned")
            .get_mut(namespace)
            .is_some_and(|ns| ns.remove(key).is_some())
    }
}

impl Default for InMemoryNamespaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceStore for InMemoryNamespaceStore {
    fn commit(&self, batch: &WriteBatch) -> PackResult<()> {
        let mut map = self.namespaces.write().expect("lock poisoned");
        let ns = map.entry(batch.namespace().to_string()).or_default();
        for (key, value) in batch.puts() {
            ns.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn entries(&self, namespace: &str) -> PackResult<Vec<(String, String)>> {
        let map = self.namespaces.read().expect("lock poisoned");
        Ok(map
            .get(namespace)
            .map(|ns| ns.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    fn contains_namespace(&self, namespace: &str) -> PackResult<bool> {
        let map = self.namespaces.read().expect("lock poisoned");
        Ok(map.contains_key(namespace))
    }

    fn get(&self, namespace: &str, key: &str) -> PackResult<Option<String>> {
        let map = self.namespaces.read().expect("lock poisoned");
        Ok(map.get(namespace).and_then(|ns| ns.get(key)).cloned())
    }
}

impl std::fmt::Debug for InMemoryNamespaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNamespaceStore")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}
