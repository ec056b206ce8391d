use thiserror::Error;

use crate::document_type::DocumentType;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("document is missing a non-empty `_id`")]
    MissingIdentifier,

    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    #[error("folder {folder} has type {found}, pack holds {expected}")]
    FolderTypeMismatch {
        folder: String,
        expected: DocumentType,
        found: DocumentType,
    },

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("serialization error: {0}")]
    Serialization(String),
}
