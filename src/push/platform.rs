use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::payload::DisplayNotification;

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    #[serde(alias = "default")]
    Prompt,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Prompt => "prompt",
        };
        f.write_str(name)
    }
}

/// The endpoint and encryption keys of a platform push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushKeys {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// What the host runtime offers for push messaging.
///
/// Errors are plain strings; the service wraps them in `PushError::Platform`.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    fn is_supported(&self) -> bool;

    fn permission(&self) -> Permission;

    async fn request_permission(&self) -> Permission;

    /// Create (or return the existing) subscription for `application_server_key`.
    async fn subscribe(&self, application_server_key: &[u8]) -> Result<PushKeys, String>;

    async fn current_subscription(&self) -> Result<Option<PushKeys>, String>;

    /// Drop the local subscription. Returns whether one existed.
    async fn unsubscribe(&self) -> Result<bool, String>;

    async fn show_notification(&self, notification: &DisplayNotification) -> Result<(), String>;

    /// Sent along with new subscriptions so users can tell their devices apart.
    fn user_agent(&self) -> Option<String> {
        None
    }
}
