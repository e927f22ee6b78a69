use std::sync::Arc;

use habitrack_client::config::{load_config_from_str, ConfigV1};
use habitrack_client::store::KeyValueStore;
use habitrack_client::HabitClient;

pub const ANA_JSON: &str =
    r#"{"id": 1, "nombre": "Ana", "email": "a@x.com", "ver_futuro": false, "created_at": "2025-01-01T00:00:00"}"#;

pub fn login_response(token: &str) -> String {
    format!(
        r#"{{"access_token": "{}", "token_type": "bearer", "user": {}}}"#,
        token, ANA_JSON
    )
}

/// Configuration pointing at a mock backend, with an in-memory store.
pub fn test_config(base_url: &str, validate_on_startup: bool) -> ConfigV1 {
    load_config_from_str(&format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
session:
  validate_on_startup: {}
store:
  enabled: true
  type: memory
logging:
  level: "debug"
  format: "console"
"#,
        base_url, validate_on_startup
    ))
    .expect("test config should parse")
}

/// A client over `storage`, as a fresh process reading the same durable state would see it.
pub fn client_over(config: &ConfigV1, storage: Arc<dyn KeyValueStore>) -> HabitClient {
    HabitClient::with_storage(Arc::new(config.clone()), storage)
}
