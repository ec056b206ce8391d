use crate::batch::WriteBatch;
use crate::error::PackResult;

/// A store partitioned into independent, named key spaces.
///
/// All implementations must satisfy these invariants:
/// - A [`WriteBatch`] commits all-or-nothing within its namespace. There is
///   no atomicity across namespaces.
/// - Within a namespace, writing an existing key replaces its value.
/// - [`entries`](Self::entries) returns every entry in a total order over
///   keys, and the same order on every call against unmodified data.
/// - A namespace that was never written reads as empty, and
///   [`contains_namespace`](Self::contains_namespace) reports it absent.
///   Committing a batch creates its namespace even when the batch is empty.
/// - Values are stored and returned verbatim; the store never interprets them.
pub trait NamespaceStore: Send + Sync {
    /// Commit one namespace batch atomically.
    fn commit(&self, batch: &WriteBatch) -> PackResult<()>;

    /// All `(key, value)` pairs of a namespace, in key order.
    fn entries(&self, namespace: &str) -> PackResult<Vec<(String, String)>>;

    /// Returns `true` if a batch was ever committed to `namespace`.
    fn contains_namespace(&self, namespace: &str) -> PackResult<bool>;

    /// Read one value. Returns `Ok(None)` if the key does not exist.
    fn get(&self, namespace: &str, key: &str) -> PackResult<Option<String>>;

    /// Read multiple values, one slot per key, in the order of `keys`.
    ///
    /// Default implementation calls `get()` for each key. Backends may
    /// override to share one read transaction.
    fn get_many(&self, namespace: &str, keys: &[String]) -> PackResult<Vec<Option<String>>> {
        keys.iter().map(|key| self.get(namespace, key)).collect()
    }
}
