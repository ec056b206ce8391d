use cpack_types::{
    embedded_key, validate_identifier, Document, Folder, KeyScheme, TypeError, ID_FIELD,
};
use serde_json::Value;

use crate::batch::WriteBatch;
use crate::error::{PackError, PackResult};
use crate::traits::NamespaceStore;

/// The flat form of a pack: one batch per namespace, ready to commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedPack {
    /// Top-level documents with embedded arrays reduced to identifiers.
    pub documents: WriteBatch,
    /// Embedded bodies keyed `"<parent>.<child>"`, when any were staged.
    pub embedded: Option<WriteBatch>,
    /// Folders, when any were supplied.
    pub folders: Option<WriteBatch>,
}

/// Counts of what a write committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub documents: usize,
    pub embedded: usize,
    pub folders: usize,
}

/// Normalizes documents into namespace batches and commits them.
#[derive(Clone, Copy, Debug)]
pub struct PackWriter {
    scheme: KeyScheme,
}

impl PackWriter {
    pub fn new(scheme: KeyScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    /// Split documents and folders into namespace batches.
    ///
    /// Every inlined embedded object carrying an `_id` is moved into the
    /// embedded batch and replaced by its bare identifier; other array
    /// elements pass through unchanged. The input is not modified. All
    /// validation happens here, so a rejected input never reaches storage.
    pub fn normalize(&self, documents: &[Document], folders: &[Folder]) -> PackResult<NormalizedPack> {
        let composite = self.scheme.embedded.is_some();
        let mut doc_batch = WriteBatch::new(self.scheme.documents);
        let mut embedded_batch = self.scheme.embedded.map(|e| WriteBatch::new(e.namespace));

        for source in documents {
            let id = source.id().ok_or(TypeError::MissingIdentifier)?;
            validate_identifier(id, composite)?;

            let mut doc = source.clone();
            if let (Some(scheme), Some(batch)) = (self.scheme.embedded, embedded_batch.as_mut()) {
                if let Some(Value::Array(elements)) = doc.get_mut(scheme.field) {
                    for element in elements.iter_mut() {
                        let Value::Object(body) = &mut *element else { continue };
                        let Some(child) = body.get(ID_FIELD) else { continue };
                        let child_id = match child {
                            Value::String(s) if !s.is_empty() => s.clone(),
                            Value::Number(n) => n.to_string(),
                            _ => return Err(TypeError::MissingIdentifier.into()),
                        };
                        validate_identifier(&child_id, true)?;
                        batch.put(embedded_key(id, &child_id), encode(&*body)?);
                        *element = Value::String(child_id);
                    }
                }
            }
            doc_batch.put(id, encode(doc.as_map())?);
        }

        let folders = if folders.is_empty() {
            None
        } else {
            let mut batch = WriteBatch::new(self.scheme.folders());
            for folder in folders {
                validate_identifier(&folder.id, false)?;
                if folder.kind != self.scheme.document_type {
                    return Err(TypeError::FolderTypeMismatch {
                        folder: folder.id.clone(),
                        expected: self.scheme.document_type,
                        found: folder.kind,
                    }
                    .into());
                }
                batch.put(folder.id.clone(), encode(folder)?);
            }
            Some(batch)
        };

        Ok(NormalizedPack {
            documents: doc_batch,
            embedded: embedded_batch.filter(|b| !b.is_empty()),
            folders,
        })
    }

    /// Commit a normalized pack: documents, then embedded, then folders.
    ///
    /// Each batch is its own atomic unit. A failure aborts the remaining
    /// batches and leaves the earlier ones committed.
    pub fn commit(&self, store: &dyn NamespaceStore, pack: &NormalizedPack) -> PackResult<WriteSummary> {
        let mut summary = WriteSummary::default();

        store.commit(&pack.documents)?;
        summary.documents = pack.documents.len();
        tracing::debug!(namespace = pack.documents.namespace(), entries = summary.documents, "committed batch");

        if let Some(batch) = &pack.embedded {
            store.commit(batch)?;
            summary.embedded = batch.len();
            tracing::debug!(namespace = batch.namespace(), entries = summary.embedded, "committed batch");
        }

        if let Some(batch) = &pack.folders {
            store.commit(batch)?;
            summary.folders = batch.len();
            tracing::debug!(namespace = batch.namespace(), entries = summary.folders, "committed batch");
        }

        Ok(summary)
    }

    /// Normalize and commit in one step.
    pub fn write(
        &self,
        store: &dyn NamespaceStore,
        documents: &[Document],
        folders: &[Folder],
    ) -> PackResult<WriteSummary> {
        let pack = self.normalize(documents, folders)?;
        self.commit(store, &pack)
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> PackResult<String> {
    serde_json::to_string(value).map_err(|e| PackError::Serialization(e.to_string()))
}
