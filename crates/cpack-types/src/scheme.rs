//! Key-scheme resolution: which namespaces a pack uses, and where embedded
//! documents live.
//!
//! | type         | documents | embedded field | embedded namespace |
//! |--------------|-----------|----------------|--------------------|
//! | Actor        | `actors`  | `items`        | `items`            |
//! | JournalEntry | `journal` | `pages`        | `pages`            |
//! | RollTable    | `tables`  | `results`      | `results`          |
//! | Item         | `items`   | —              | —                  |
//! | Macro        | `macros`  | —              | —                  |
//!
//! Folders always live in [`FOLDERS_NAMESPACE`].

use crate::document_type::DocumentType;
use crate::error::TypeError;

/// Namespace holding folders, for every document type.
pub const FOLDERS_NAMESPACE: &str = "folders";

/// Separator between parent and embedded identifier in composite keys.
pub const EMBEDDED_KEY_SEPARATOR: char = '.';

/// Where embedded documents of a pack are referenced and stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbeddedScheme {
    /// Field on the parent document holding the embedded array.
    pub field: &'static str,
    /// Namespace holding the embedded bodies.
    pub namespace: &'static str,
}

/// The namespace layout of a pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyScheme {
    pub document_type: DocumentType,
    /// Namespace holding top-level documents.
    pub documents: &'static str,
    /// Embedded layout, for types that own sub-documents.
    pub embedded: Option<EmbeddedScheme>,
}

impl KeyScheme {
    /// Resolve the key scheme for a document type.
    pub fn resolve(document_type: DocumentType) -> Self {
        let (documents, embedded) = match document_type {
            DocumentType::Actor => ("actors", Some(("items", "items"))),
            DocumentType::JournalEntry => ("journal", Some(("pages", "pages"))),
            DocumentType::RollTable => ("tables", Some(("results", "results"))),
            DocumentType::Item => ("items", None),
            DocumentType::Macro => ("macros", None),
        };
        Self {
            document_type,
            documents,
            embedded: embedded.map(|(field, namespace)| EmbeddedScheme { field, namespace }),
        }
    }

    /// Resolve the key scheme from a raw type tag.
    ///
    /// Fails with [`TypeError::UnknownDocumentType`] for tags outside the
    /// closed set.
    pub fn for_tag(tag: &str) -> Result<Self, TypeError> {
        Ok(Self::resolve(tag.parse()?))
    }

    /// Namespace holding folders.
    pub fn folders(&self) -> &'static str {
        FOLDERS_NAMESPACE
    }

    /// Field holding embedded references, if any.
    pub fn embedded_field(&self) -> Option<&'static str> {
        self.embedded.map(|e| e.field)
    }

    /// Namespace holding embedded bodies, if any.
    pub fn embedded_namespace(&self) -> Option<&'static str> {
        self.embedded.map(|e| e.namespace)
    }
}

/// Composite key of an embedded document: `"<parent>.<child>"`.
pub fn embedded_key(parent_id: &str, embedded_id: &str) -> String {
    format!("{parent_id}{EMBEDDED_KEY_SEPARATOR}{embedded_id}")
}

/// Validate a document identifier.
///
/// Identifiers must be non-empty. When `composite` is set the identifier takes
/// part in an embedded key and must not contain [`EMBEDDED_KEY_SEPARATOR`],
/// otherwise `a.b` + `c` and `a` + `b.c` would collide.
pub fn validate_identifier(id: &str, composite: bool) -> Result<(), TypeError> {
    if id.is_empty() {
        return Err(TypeError::MissingIdentifier);
    }
    if composite && id.contains(EMBEDDED_KEY_SEPARATOR) {
        return Err(TypeError::InvalidIdentifier {
            id: id.to_string(),
            reason: format!("must not contain '{EMBEDDED_KEY_SEPARATOR}'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_scheme() {
        let s = KeyScheme::resolve(DocumentType::Actor);
        assert_eq!(s.documents, "actors");
        assert_eq!(s.embedded_field(), Some("items"));
        assert_eq!(s.embedded_namespace(), Some("items"));
        assert_eq!(s.folders(), "folders");
    }

    #[test]
    fn journal_and_table_schemes() {
        let j = KeyScheme::resolve(DocumentType::JournalEntry);
        assert_eq!(j.documents, "journal");
        assert_eq!(j.embedded_field(), Some("pages"));

        let t = KeyScheme::resolve(DocumentType::RollTable);
        assert_eq!(t.documents, "tables");
        assert_eq!(t.embedded_namespace(), Some("results"));
    }

    #[test]
    fn flat_schemes() {
        let i = KeyScheme::resolve(DocumentType::Item);
        assert_eq!(i.documents, "items");
        assert!(i.embedded.is_none());

        let m = KeyScheme::resolve(DocumentType::Macro);
        assert_eq!(m.documents, "macros");
        assert!(m.embedded_field().is_none());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = KeyScheme::for_tag("Spell").unwrap_err();
        assert!(matches!(err, TypeError::UnknownDocumentType(t) if t == "Spell"));
    }

    #[test]
    fn composite_key_format() {
        assert_eq!(embedded_key("abc", "xyz"), "abc.xyz");
    }

    #[test]
    fn identifier_validation() {
        assert!(validate_identifier("abc123", true).is_ok());
        assert_eq!(validate_identifier("", false), Err(TypeError::MissingIdentifier));
        assert!(validate_identifier("a.b", false).is_ok());
        assert!(matches!(
            validate_identifier("a.b", true),
            Err(TypeError::InvalidIdentifier { .. })
        ));
    }
}
