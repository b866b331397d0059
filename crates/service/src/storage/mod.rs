//! Storage abstractions for service layer
//!
//! A collection is a JSON array of records in a single file, rewritten in
//! full on every mutation.

pub mod collection_store;

pub use collection_store::CollectionStore;
pub use configs::WriteMode;
