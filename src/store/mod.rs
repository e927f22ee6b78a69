//! Durable key-value backends the session is mirrored to.
pub mod base;
pub mod file_store;
pub mod memory_store;
pub mod no_store;

pub use base::{create_store, KeyValueStore, StoreError};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use no_store::NoStore;
