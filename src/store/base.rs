use std::sync::Arc;

use tracing::{error, info};

use super::{file_store::FileStore, memory_store::MemoryStore, no_store::NoStore};
use crate::config::{StoreBackend, StoreConfig};

/// Errors raised by a durable key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage is disabled")]
    Disabled,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid storage configuration: {0}")]
    Config(String),
}

/// The KeyValueStore trait abstracts the durable storage the session is mirrored to.
///
/// Calls are synchronous from the caller's point of view and best-effort: there is
/// no transactional guarantee against another process touching the same storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn is_enabled(&self) -> bool {
        // Real stores are always enabled.
        // NoStore returns false so callers can skip it quietly.
        true
    }
}

/// Creates a concrete store implementation based on the StoreConfig.
/// If `store.enabled = false`, returns NoStore. Otherwise, picks the specified backend.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    if !config.enabled {
        info!("Session storage is disabled. Using NoStore.");
        return Ok(Arc::new(NoStore::new()));
    }

    match &config.backend {
        Some(StoreBackend::File(file_config)) => {
            info!("Persisting session to '{}'.", file_config.path);
            Ok(Arc::new(FileStore::new(&file_config.path)))
        }
        Some(StoreBackend::Memory) => {
            info!("Keeping session in memory only.");
            Ok(Arc::new(MemoryStore::new()))
        }
        None => {
            error!("Session storage is enabled, but no backend config is provided!");
            Err(StoreError::Config(
                "store.enabled is true but no store.type was given".to_string(),
            ))
        }
    }
}
