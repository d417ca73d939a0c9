//! Core `adapters` crate for abstracting the console's client-side storage.
//!
//! This crate defines the `KeyValueStore` trait, which outlines the small
//! string-keyed storage surface the session layer persists into, and provides
//! the concrete backends (in-memory, JSON file) behind it.

pub mod errors;
pub mod file;
pub mod memory;
pub mod models;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::{StorageDocument, DOCUMENT_VERSION};

/// String-keyed storage holding the console session between requests.
///
/// Every call is synchronous and atomic per key: a reader never observes a
/// half-written value. Implementations are shared across request handlers,
/// hence `Send + Sync`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
