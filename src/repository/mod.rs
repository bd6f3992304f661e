//! Repository Layer
//!
//! The document-store port, its backends, and the ordered collection store.

mod collection;
mod json_store;
mod memory;
mod reorder;
mod traits;


pub use collection::{CollectionStore, SubscriptionHandle};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use reorder::ReorderOperations;
pub use traits::{Document, DocumentStore, StoreError, StoreResult};
