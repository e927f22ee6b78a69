//! Versioned YAML configuration with `HABITRACK_*` environment overrides.
pub mod logging;
pub mod store;
pub mod types;

pub use logging::LoggingConfig;
pub use store::{FileStoreConfig, StoreBackend, StoreConfig};
pub use types::{
    load_config, load_config_from_str, print_schema, ApiConfig, Config, ConfigV1, SessionConfig,
    ENV_PREFIX,
};
