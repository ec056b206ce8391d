//! On-disk namespace store backed by a single redb database file.
//!
//! Every namespace is a redb table of UTF-8 keys to JSON text. redb holds an
//! exclusive lock on the file for the lifetime of the [`Database`], so a
//! second handle on the same pack fails with [`PackError::Locked`] instead of
//! sharing it.

use std::path::{Path, PathBuf};

use redb::{Builder, Database, DatabaseError, ReadableTable, TableDefinition, TableError};

use crate::batch::WriteBatch;
use crate::config::PackConfig;
use crate::error::{PackError, PackResult};
use crate::traits::NamespaceStore;

type NamespaceTable<'a> = TableDefinition<'a, &'static str, &'static str>;

fn namespace_table(namespace: &str) -> NamespaceTable<'_> {
    TableDefinition::new(namespace)
}

/// redb-backed [`NamespaceStore`] for one pack location.
pub struct RedbNamespaceStore {
    db: Database,
    path: PathBuf,
}

impl RedbNamespaceStore {
    /// Create a fresh, empty database in the pack directory.
    ///
    /// Creates the directory if needed. An existing database is discarded,
    /// but only after its lock could be taken: a pack held by another handle
    /// fails with [`PackError::Locked`] and is left untouched.
    pub fn create(dir: &Path, config: &PackConfig) -> PackResult<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&config.file_name);

        if path.exists() {
            // The lock is released before the file is removed; another
            // process opening the pack in between is not guarded against.
            match builder(config).open(&path) {
                Ok(previous) => drop(previous),
                Err(DatabaseError::DatabaseAlreadyOpen) => return Err(PackError::Locked(path)),
                Err(e) => {
                    tracing::warn!("replacing unreadable pack database {:?}: {}", path, e);
                }
            }
            std::fs::remove_file(&path)?;
        }

        let db = builder(config)
            .create(&path)
            .map_err(|e| open_error(&path, e))?;
        tracing::debug!(path = %path.display(), "created pack database");
        Ok(Self { db, path })
    }

    /// Open the existing database in the pack directory.
    ///
    /// Fails with [`PackError::PackNotFound`] if the directory or the
    /// database file does not exist.
    pub fn open(dir: &Path, config: &PackConfig) -> PackResult<Self> {
        let path = dir.join(&config.file_name);
        if !path.is_file() {
            return Err(PackError::PackNotFound(dir.to_path_buf()));
        }
        let db = builder(config).open(&path).map_err(|e| open_error(&path, e))?;
        tracing::debug!(path = %path.display(), "opened pack database");
        Ok(Self { db, path })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the database and its file lock.
    pub fn close(self) {
        drop(self.db);
    }
}

fn builder(config: &PackConfig) -> Builder {
    let mut builder = Builder::new();
    if let Some(size) = config.cache_size {
        builder.set_cache_size(size);
    }
    builder
}

fn open_error(path: &Path, e: DatabaseError) -> PackError {
    match e {
        DatabaseError::DatabaseAlreadyOpen => PackError::Locked(path.to_path_buf()),
        other => PackError::Database(format!("{}: {other}", path.display())),
    }
}

impl NamespaceStore for RedbNamespaceStore {
    fn commit(&self, batch: &WriteBatch) -> PackResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(namespace_table(batch.namespace()))?;
            for (key, value) in batch.puts() {
                table.insert(key.as_str(), value.as_str())?;
            }
        }
        txn.commit().map_err(|e| PackError::Commit {
            namespace: batch.namespace().to_string(),
            reason: e.to_string(),
        })
    }

    fn entries(&self, namespace: &str) -> PackResult<Vec<(String, String)>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(namespace_table(namespace)) {
            Ok(t) => t,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut out = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            out.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(out)
    }

    fn contains_namespace(&self, namespace: &str) -> PackResult<bool> {
        let txn = self.db.begin_read()?;
        match txn.open_table(namespace_table(namespace)) {
            Ok(_) => Ok(true),
            Err(TableError::TableDoesNotExist(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, namespace: &str, key: &str) -> PackResult<Option<String>> {
        let keys = [key.to_string()];
        Ok(self.get_many(namespace, &keys)?.pop().flatten())
    }

    fn get_many(&self, namespace: &str, keys: &[String]) -> PackResult<Vec<Option<String>>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(namespace_table(namespace)) {
            Ok(t) => t,
            Err(TableError::TableDoesNotExist(_)) => return Ok(vec![None; keys.len()]),
            Err(e) => return Err(e.into()),
        };

        keys.iter()
            .map(|key| -> PackResult<Option<String>> {
                Ok(table
                    .get(key.as_str())?
                    .map(|guard| guard.value().to_string()))
            })
            .collect()
    }
}

impl std::fmt::Debug for RedbNamespaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbNamespaceStore")
            .field("path", &self.path)
            .finish()
    }
}
