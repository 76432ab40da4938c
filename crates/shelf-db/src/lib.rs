//! Shelf document store
//!
//! Products are written as schemaless JSON documents into a named collection. The store
//! assigns each document its own identifier, independent of any id inside the body.
//! Backends: Postgres (a `documents` table with a JSONB body) and the local filesystem
//! (one JSON file per document).

pub mod documents;
pub mod error;
pub mod factory;

pub use documents::{DocumentStore, LocalDocumentStore, PostgresDocumentStore};
pub use error::{DocumentError, DocumentResult};
pub use factory::create_document_store;
