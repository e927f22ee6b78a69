use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// Environment variables with this prefix override values from the YAML file.
/// Nested keys are separated by `__`, e.g. `HABITRACK_API__BASE_URL`.
pub const ENV_PREFIX: &str = "HABITRACK_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend address, session behaviour, storage and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Where the backend lives.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

/// Session lifecycle settings.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    /// Where the client is sent when the backend rejects its credentials.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Re-check a persisted token against `/auth/me` at startup.
    #[serde(default = "default_true")]
    pub validate_on_startup: bool,
    /// Routes reachable without a session.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            validate_on_startup: true,
            public_paths: default_public_paths(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_true() -> bool {
    true
}

fn default_public_paths() -> Vec<String> {
    vec!["/login".to_string(), "/register".to_string()]
}

/// Load config from a YAML file, with `HABITRACK_*` environment overrides on top.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Parse a configuration held in memory (tests, embedded defaults).
pub fn load_config_from_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => eprintln!("Error rendering configuration schema: {}", e),
    }
}
