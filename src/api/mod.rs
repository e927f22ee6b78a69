//! Session-aware access to the habit-tracking backend.
pub mod auth;
pub mod client;
pub mod error;
pub mod habits;
pub mod navigator;
pub mod notifications;
pub mod records;

pub use client::{ApiClient, AuthMode, RequestOptions};
pub use error::ApiError;
pub use navigator::{Navigator, RedirectSlot};
