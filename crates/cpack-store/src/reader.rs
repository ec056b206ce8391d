use cpack_types::{embedded_key, sort_folders, Document, EmbeddedScheme, Folder, KeyScheme};
use serde_json::Value;

use crate::config::ResolutionMode;
use crate::error::{PackError, PackResult};
use crate::traits::NamespaceStore;

/// An embedded reference that could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingReference {
    /// Key of the top-level document holding the reference.
    pub parent: String,
    /// The unresolved embedded identifier.
    pub id: String,
}

/// Non-fatal findings of a read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadReport {
    /// References dropped from embedded arrays, in read order.
    pub missing: Vec<MissingReference>,
}

impl ReadReport {
    /// Returns `true` if every embedded reference resolved.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// A pack read back into tree form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackContents {
    /// Top-level documents in store key order, embedded arrays resolved.
    pub documents: Vec<Document>,
    /// Folders sorted by `sort`, then `name`.
    pub folders: Vec<Folder>,
    pub report: ReadReport,
}

/// Denormalizes a pack's namespaces back into documents and folders.
#[derive(Clone, Copy, Debug)]
pub struct PackReader {
    scheme: KeyScheme,
    mode: ResolutionMode,
}

impl PackReader {
    pub fn new(scheme: KeyScheme, mode: ResolutionMode) -> Self {
        Self { scheme, mode }
    }

    pub fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    /// Read every document, resolving embedded references, then every folder.
    pub fn read(&self, store: &dyn NamespaceStore) -> PackResult<PackContents> {
        let mut report = ReadReport::default();
        let mut documents = Vec::new();

        // Every written pack has its top-level namespace, even when empty.
        // Folders are only written when supplied, so their absence is fine.
        if !store.contains_namespace(self.scheme.documents)? {
            return Err(PackError::MissingNamespace {
                namespace: self.scheme.documents.to_string(),
            });
        }

        for (key, json) in store.entries(self.scheme.documents)? {
            let mut doc = decode_document(self.scheme.documents, &key, &json)?;
            if let Some(embedded) = self.scheme.embedded {
                self.resolve_embedded(store, embedded, &key, &mut doc, &mut report)?;
            }
            documents.push(doc);
        }

        let folder_ns = self.scheme.folders();
        let mut folders = store
            .entries(folder_ns)?
            .into_iter()
            .map(|(key, json)| {
                serde_json::from_str::<Folder>(&json).map_err(|e| corrupt(folder_ns, &key, e))
            })
            .collect::<PackResult<Vec<_>>>()?;
        sort_folders(&mut folders);

        Ok(PackContents {
            documents,
            folders,
            report,
        })
    }

    /// Replace the identifier array under the embedded field with the
    /// resolved bodies, in identifier order.
    ///
    /// Non-string elements stay in place. Unresolved identifiers are dropped
    /// in tolerant mode and fail the read in strict mode.
    fn resolve_embedded(
        &self,
        store: &dyn NamespaceStore,
        embedded: EmbeddedScheme,
        parent: &str,
        doc: &mut Document,
        report: &mut ReadReport,
    ) -> PackResult<()> {
        let Some(Value::Array(elements)) = doc.get_mut(embedded.field) else {
            return Ok(());
        };

        let keys: Vec<String> = elements
            .iter()
            .filter_map(Value::as_str)
            .map(|id| embedded_key(parent, id))
            .collect();
        let mut fetched = store.get_many(embedded.namespace, &keys)?.into_iter().zip(keys);

        let mut resolved = Vec::with_capacity(elements.len());
        for element in elements.drain(..) {
            let Value::String(id) = element else {
                resolved.push(element);
                continue;
            };
            match fetched.next() {
                Some((Some(json), key)) => {
                    let body: Value = serde_json::from_str(&json)
                        .map_err(|e| corrupt(embedded.namespace, &key, e))?;
                    resolved.push(body);
                }
                _ => {
                    if self.mode == ResolutionMode::Strict {
                        return Err(PackError::MissingEmbedded {
                            parent: parent.to_string(),
                            id,
                        });
                    }
                    tracing::warn!(
                        namespace = embedded.namespace,
                        parent,
                        id = %id,
                        "dropping unresolved embedded reference"
                    );
                    report.missing.push(MissingReference {
                        parent: parent.to_string(),
                        id,
                    });
                }
            }
        }
        *elements = resolved;
        Ok(())
    }
}

fn decode_document(namespace: &str, key: &str, json: &str) -> PackResult<Document> {
    Document::from_json(json).map_err(|e| PackError::Corrupt {
        namespace: namespace.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn corrupt(namespace: &str, key: &str, e: serde_json::Error) -> PackError {
    PackError::Corrupt {
        namespace: namespace.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    }
}
