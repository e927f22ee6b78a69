//! Push registration on the client side and notification handling on the worker side.
pub mod payload;
pub mod platform;
pub mod service;
pub mod vapid;

pub use payload::{
    display_push, resolve_click, ClickOutcome, DisplayNotification, NotificationAction,
    NotificationData, WindowClient,
};
pub use platform::{Permission, PushKeys, PushPlatform};
pub use service::{PushError, PushService};
