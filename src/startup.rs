//! Client startup.
//!
//! Builds the [`HabitClient`] from configuration, restores the persisted
//! session and reports where the host should land.

use std::sync::Arc;
use tracing::info;

use crate::config::ConfigV1;
use crate::session::{RouteDecision, SessionState};
use crate::state::HabitClient;

/// Builds the client and restores its session.
///
/// # Errors
///
/// Returns an error if the configured session storage cannot be set up.
/// A rejected or unreadable persisted session is not an error; the client
/// simply starts anonymous.
pub async fn run(config: Arc<ConfigV1>) -> Result<HabitClient, Box<dyn std::error::Error>> {
    info!("Using backend at {}", config.api.base_url);
    let client = HabitClient::new(config)?;

    let state = client.initialize().await;
    match state {
        SessionState::Authenticated => {
            let name = client
                .session
                .profile()
                .map(|p| p.name)
                .unwrap_or_default();
            info!(
                event_name = "session.restored",
                event_domain = "session",
                "Session restored for {}",
                name
            );
        }
        other => info!("Starting with session state {:?}", other),
    }

    if let RouteDecision::Redirect(target) = client.route_guard("/") {
        info!("Landing page is {}", target);
    }
    if let Some(pending) = client.redirects.peek() {
        info!("Pending redirect to {}", pending);
    }

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[tokio::test]
    async fn test_run_without_persisted_session_is_anonymous() {
        let config = load_config_from_str(
            r#"
version: "1.0.0"
api:
  base_url: "http://127.0.0.1:9"
store:
  enabled: true
  type: memory
logging:
  level: "info"
  format: "console"
"#,
        )
        .unwrap();

        let client = run(Arc::new(config)).await.unwrap();
        assert_eq!(client.session.state(), SessionState::Anonymous);
        assert_eq!(
            client.route_guard("/"),
            RouteDecision::Redirect("/login".to_string())
        );
        assert_eq!(client.redirects.peek(), None);
    }

    #[tokio::test]
    async fn test_run_rejects_store_without_backend() {
        let config = load_config_from_str(
            r#"
version: "1.0.0"
store:
  enabled: true
logging:
  level: "info"
  format: "console"
"#,
        )
        .unwrap();

        assert!(run(Arc::new(config)).await.is_err());
    }
}
