use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A wrapper for the session storage configuration:
/// - enabled: if false, nothing survives a restart (NoStore).
/// - backend: where the token and profile are written.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StoreConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

/// The storage backends, differentiated by a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "file")]
    File(FileStoreConfig),
    #[serde(rename = "memory")]
    Memory,
}

/// A JSON document on disk holding every persisted key.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    pub path: String,
}
