use std::path::{Path, PathBuf};

use cpack_types::{Document, DocumentType, Folder, KeyScheme};

use crate::config::PackConfig;
use crate::error::PackResult;
use crate::reader::{PackContents, PackReader};
use crate::redb_store::RedbNamespaceStore;
use crate::writer::{PackWriter, WriteSummary};

/// An open pack: one database handle plus the key scheme of its type.
///
/// The handle holds the database lock until [`rebuild`](Self::rebuild) or
/// [`read_entries`](Self::read_entries) consumes it, so each operation runs
/// with sole ownership of the location and releases it on return.
#[derive(Debug)]
pub struct PackDatabase {
    location: PathBuf,
    scheme: KeyScheme,
    config: PackConfig,
    store: RedbNamespaceStore,
}

impl PackDatabase {
    /// Create a fresh, empty pack at `location`.
    pub fn create(location: &Path, document_type: DocumentType, config: PackConfig) -> PackResult<Self> {
        let store = RedbNamespaceStore::create(location, &config)?;
        Ok(Self {
            location: location.to_path_buf(),
            scheme: KeyScheme::resolve(document_type),
            config,
            store,
        })
    }

    /// Open an existing pack at `location`.
    pub fn open(location: &Path, document_type: DocumentType, config: PackConfig) -> PackResult<Self> {
        let store = RedbNamespaceStore::open(location, &config)?;
        Ok(Self {
            location: location.to_path_buf(),
            scheme: KeyScheme::resolve(document_type),
            config,
            store,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    /// Write documents and folders into the pack, then release it.
    pub fn rebuild(self, documents: &[Document], folders: &[Folder]) -> PackResult<WriteSummary> {
        let summary = PackWriter::new(self.scheme).write(&self.store, documents, folders)?;
        self.store.close();
        Ok(summary)
    }

    /// Read every document and folder, then release the pack.
    pub fn read_entries(self) -> PackResult<PackContents> {
        let contents = PackReader::new(self.scheme, self.config.resolution).read(&self.store)?;
        self.store.close();
        Ok(contents)
    }
}

/// Rebuild the pack at `location` from in-memory documents and folders.
///
/// The type tag is resolved and the input normalized before the location is
/// touched, so an unknown type or a malformed document performs no I/O.
pub fn rebuild_pack(
    location: &Path,
    document_type: &str,
    documents: &[Document],
    folders: &[Folder],
    config: &PackConfig,
) -> PackResult<WriteSummary> {
    let scheme = KeyScheme::for_tag(document_type)?;
    let writer = PackWriter::new(scheme);
    let normalized = writer.normalize(documents, folders)?;

    let store = RedbNamespaceStore::create(location, config)?;
    let summary = writer.commit(&store, &normalized)?;
    store.close();

    tracing::info!(
        pack = %location.display(),
        documents = summary.documents,
        embedded = summary.embedded,
        folders = summary.folders,
        "rebuilt pack"
    );
    Ok(summary)
}

/// Read the pack at `location` into documents and folders.
pub fn read_pack(location: &Path, document_type: &str, config: &PackConfig) -> PackResult<PackContents> {
    let scheme = KeyScheme::for_tag(document_type)?;
    let contents = PackDatabase::open(location, scheme.document_type, config.clone())?.read_entries()?;

    tracing::info!(
        pack = %location.display(),
        documents = contents.documents.len(),
        folders = contents.folders.len(),
        dropped = contents.report.missing.len(),
        "read pack"
    );
    Ok(contents)
}
