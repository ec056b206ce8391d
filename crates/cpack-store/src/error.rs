use std::path::PathBuf;

use cpack_types::TypeError;

/// Errors from pack storage operations.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The pack's document type is not recognized. Raised before any I/O.
    #[error("configuration error: {0}")]
    Configuration(TypeError),

    /// A document or folder supplied for writing is malformed. Raised before
    /// any I/O.
    #[error("invalid pack input: {0}")]
    InvalidInput(TypeError),

    /// The pack location does not exist or holds no database.
    #[error("pack not found at {}", .0.display())]
    PackNotFound(PathBuf),

    /// A namespace every pack of this type carries is absent, so the
    /// location holds no pack of the requested type.
    #[error("pack has no {namespace} namespace")]
    MissingNamespace { namespace: String },

    /// The pack database is already held by another handle.
    #[error("pack database {} is locked by another handle", .0.display())]
    Locked(PathBuf),

    /// Error from the underlying database.
    #[error("database error: {0}")]
    Database(String),

    /// A namespace batch failed to commit.
    #[error("failed to commit namespace {namespace}: {reason}")]
    Commit { namespace: String, reason: String },

    /// A stored value could not be decoded.
    #[error("corrupt entry {namespace}/{key}: {reason}")]
    Corrupt {
        namespace: String,
        key: String,
        reason: String,
    },

    /// An embedded reference could not be resolved (strict mode only).
    #[error("embedded document {id} referenced by {parent} is missing")]
    MissingEmbedded { parent: String, id: String },

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while staging a write.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PackError {
    /// Returns `true` for an unrecognized document type.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` for failures of the storage location itself.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::PackNotFound(_)
                | Self::MissingNamespace { .. }
                | Self::Locked(_)
                | Self::Database(_)
                | Self::Commit { .. }
                | Self::Corrupt { .. }
                | Self::Io(_)
        )
    }
}

impl From<TypeError> for PackError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::UnknownDocumentType(_) => Self::Configuration(e),
            other => Self::InvalidInput(other),
        }
    }
}

impl From<redb::TransactionError> for PackError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<redb::TableError> for PackError {
    fn from(e: redb::TableError) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<redb::StorageError> for PackError {
    fn from(e: redb::StorageError) -> Self {
        Self::Database(e.to_string())
    }
}

/// Result alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;
