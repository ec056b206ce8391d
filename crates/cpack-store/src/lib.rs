//! Namespaced key-value storage for compendium packs.
//!
//! A pack on disk is one database holding independent namespaces: top-level
//! documents, folders, and, for types that own sub-documents, embedded
//! documents under composite `"<parent>.<child>"` keys. This crate converts
//! between that flat layout and the in-memory tree form.
//!
//! # Architecture
//!
//! - **PackWriter** (normalize): moves inlined embedded bodies into their own
//!   namespace, leaving identifier arrays on the parent, and commits one
//!   atomic batch per namespace: documents, then embedded, then folders.
//! - **PackReader** (denormalize): iterates documents, resolves identifier
//!   arrays in order with one multi-get per document, and returns folders
//!   sorted by `sort` then `name`.
//! - **NamespaceStore**: the storage seam, implemented by
//!   [`RedbNamespaceStore`] (one locked redb file per pack) and
//!   [`InMemoryNamespaceStore`] (tests and embedding).
//! - **rebuild_pack / read_pack**: the two entrypoints, each owning the pack
//!   location for the duration of the call.
//!
//! # Design Rules
//!
//! 1. Unknown document types fail before any I/O.
//! 2. There is no atomicity across namespaces; a failure between batches
//!    leaves the earlier batches committed.
//! 3. Embedded arrays come back in identifier order.
//! 4. Payload fields other than the embedded field are never interpreted.

pub mod batch;
pub mod config;
pub mod error;
pub mod memory;
pub mod pack;
pub mod reader;
pub mod redb_store;
pub mod traits;
pub mod writer;

pub use batch::WriteBatch;
pub use config::{PackConfig, ResolutionMode};
pub use error::{PackError, PackResult};
pub use memory::InMemoryNamespaceStore;
pub use pack::{read_pack, rebuild_pack, PackDatabase};
pub use reader::{MissingReference, PackContents, PackReader, ReadReport};
pub use redb_store::RedbNamespaceStore;
pub use traits::NamespaceStore;
pub use writer::{NormalizedPack, PackWriter, WriteSummary};
