//! What a background worker does with a push message: render it, and route
//! the click that follows.
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::platform::PushPlatform;

pub const DEFAULT_TITLE: &str = "Habit Tracker";
pub const DEFAULT_BODY: &str = "You have a new notification";
pub const DEFAULT_ICON: &str = "/favicon.png";
pub const DEFAULT_TAG: &str = "habit-notification";
pub const DEFAULT_URL: &str = "/";

pub const ACTION_OPEN: &str = "open";
pub const ACTION_DISMISS: &str = "dismiss";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// Click target carried with the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub url: String,
}

/// A notification ready to hand to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
    /// Vibration pattern in milliseconds.
    pub vibrate: Vec<u32>,
    pub require_interaction: bool,
}

impl Default for DisplayNotification {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_ICON.to_string(),
            tag: DEFAULT_TAG.to_string(),
            data: NotificationData {
                url: DEFAULT_URL.to_string(),
            },
            actions: vec![
                NotificationAction {
                    action: ACTION_OPEN.to_string(),
                    title: "Open".to_string(),
                },
                NotificationAction {
                    action: ACTION_DISMISS.to_string(),
                    title: "Dismiss".to_string(),
                },
            ],
            vibrate: vec![100, 50, 100],
            require_interaction: false,
        }
    }
}

#[derive(Deserialize, Default)]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    tag: Option<String>,
    data: Option<PayloadData>,
}

#[derive(Deserialize, Default)]
struct PayloadData {
    url: Option<String>,
}

// Empty strings count as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl DisplayNotification {
    /// Build a notification from the raw bytes of a push message.
    ///
    /// Missing fields take their defaults. A payload that is not JSON is shown
    /// as the body text.
    pub fn from_push_data(data: Option<&[u8]>) -> Self {
        let mut notification = Self::default();
        let Some(raw) = data else {
            return notification;
        };

        let value = match serde_json::from_slice::<serde_json::Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                debug!("Push payload is not JSON ({}); showing it as text.", e);
                let text = String::from_utf8_lossy(raw);
                let text = text.trim();
                if !text.is_empty() {
                    notification.body = text.to_string();
                }
                return notification;
            }
        };

        // JSON that is not an object, or has mistyped fields, keeps the defaults.
        let payload = serde_json::from_value::<PushPayload>(value).unwrap_or_default();
        if let Some(title) = present(payload.title) {
            notification.title = title;
        }
        if let Some(body) = present(payload.body) {
            notification.body = body;
        }
        if let Some(icon) = present(payload.icon) {
            notification.icon = icon;
        }
        if let Some(badge) = present(payload.badge) {
            notification.badge = badge;
        }
        if let Some(tag) = present(payload.tag) {
            notification.tag = tag;
        }
        if let Some(url) = present(payload.data.and_then(|d| d.url)) {
            notification.data.url = url;
        }
        notification
    }
}

/// An open application window the worker can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
}

/// What to do after the user clicks a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignore,
    FocusAndNavigate { window_id: String, url: String },
    OpenWindow { url: String },
}

/// Route a notification click. `action` is the button pressed, if any.
pub fn resolve_click(
    action: Option<&str>,
    notification: &DisplayNotification,
    windows: &[WindowClient],
    origin: &str,
) -> ClickOutcome {
    if action == Some(ACTION_DISMISS) {
        return ClickOutcome::Ignore;
    }

    let url = notification.data.url.clone();
    match windows.iter().find(|w| w.url.starts_with(origin)) {
        Some(window) => ClickOutcome::FocusAndNavigate {
            window_id: window.id.clone(),
            url,
        },
        None => ClickOutcome::OpenWindow { url },
    }
}

/// Render an incoming push message through the platform.
pub async fn display_push(
    platform: &dyn PushPlatform,
    data: Option<&[u8]>,
) -> Result<DisplayNotification, String> {
    let notification = DisplayNotification::from_push_data(data);
    if let Err(e) = platform.show_notification(&notification).await {
        warn!(
            event_name = "push.display.failed",
            event_domain = "push",
            error = e.as_str(),
            "could not show notification"
        );
        return Err(e);
    }
    Ok(notification)
}
