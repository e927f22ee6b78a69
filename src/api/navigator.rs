use std::sync::{Mutex, PoisonError};

use tracing::info;

/// Performs client-side navigation on behalf of the API client.
///
/// Browser hosts change the location; headless hosts record the request.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Remembers the most recent redirect until the host collects it.
#[derive(Default)]
pub struct RedirectSlot {
    pending: Mutex<Option<String>>,
}

impl RedirectSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending redirect, leaving the slot empty.
    pub fn take(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn peek(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RedirectSlot {
    fn navigate(&self, path: &str) {
        info!(
            event_name = "navigation.redirect",
            event_domain = "navigation",
            path,
            "redirect requested"
        );
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }
}
