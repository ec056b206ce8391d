//! Foundation types for compendium packs.
//!
//! A pack is a collection of documents of a single [`DocumentType`], stored
//! as a set of flat key-value namespaces. This crate holds the types shared by
//! the storage engine and the tooling around it.
//!
//! # Key Types
//!
//! - [`DocumentType`] — Closed set of pack document types
//! - [`KeyScheme`] — Namespace names and embedded field derived from a type
//! - [`Document`] — Opaque top-level or embedded document body
//! - [`Folder`] — Grouping entity stored in the `folders` namespace

pub mod document;
pub mod document_type;
pub mod error;
pub mod folder;
pub mod scheme;

pub use document::{Document, ID_FIELD};
pub use document_type::DocumentType;
pub use error::TypeError;
pub use folder::{sort_folders, Folder};
pub use scheme::{
    embedded_key, validate_identifier, EmbeddedScheme, KeyScheme, EMBEDDED_KEY_SEPARATOR,
    FOLDERS_NAMESPACE,
};
