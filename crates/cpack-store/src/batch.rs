/// Puts staged for one namespace, committed as a single atomic unit.
///
/// Puts are applied in staging order, so a later put of the same key wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    namespace: String,
    puts: Vec<(String, String)>,
}

impl WriteBatch {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            puts: Vec::new(),
        }
    }

    /// Stage a put of `key` → `value` (JSON text).
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.puts.push((key.into(), value.into()));
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn puts(&self) -> &[(String, String)] {
        &self.puts
    }

    /// Number of staged puts.
    pub fn len(&self) -> usize {
        self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }
}
