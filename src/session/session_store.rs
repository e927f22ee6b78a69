use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Profile, ProfileUpdate};
use crate::store::KeyValueStore;

/// Durable key holding the raw bearer token.
pub const TOKEN_KEY: &str = "access_token";
/// Durable key holding the JSON-encoded profile.
pub const PROFILE_KEY: &str = "user";

/// Lifecycle of the session.
///
/// `Uninitialized -> Loading -> {Authenticated, Anonymous}`; afterwards
/// `Authenticated -> Anonymous` on logout or rejection, and back only through
/// a fresh login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

/// A token and the profile it belongs to. They only ever exist together.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub profile: Profile,
}

/// A point-in-time view of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: SessionState,
    credentials: Option<Credentials>,
}

impl Session {
    fn uninitialized() -> Self {
        Self {
            state: SessionState::Uninitialized,
            credentials: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.credentials.as_ref().map(|c| &c.profile)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Checks a persisted token against the backend and returns the matching profile.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<Profile, String>;
}

/// The single authoritative record of who is logged in, mirrored to durable storage.
///
/// Every transition replaces the whole [`Session`] value, so readers never see a
/// token without its profile. Subscribers are woken on each change.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: watch::Sender<Session>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (current, _) = watch::channel(Session::uninitialized());
        Self { storage, current }
    }

    /// Restore the session persisted by a previous run.
    ///
    /// With a validator, the stored token is re-checked and the profile refreshed;
    /// any failure falls back to an anonymous session. Never fails and never
    /// navigates.
    pub async fn initialize(&self, validator: Option<&dyn SessionValidator>) -> SessionState {
        self.current.send_modify(|s| s.state = SessionState::Loading);

        let Some(token) = self.read(TOKEN_KEY) else {
            debug!("No persisted token; starting anonymous.");
            self.clear_session();
            return SessionState::Anonymous;
        };

        let profile = match validator {
            Some(validator) => match validator.validate(&token).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(
                        event_name = "session.restore.rejected",
                        event_domain = "session",
                        error = e.as_str(),
                        "persisted token failed validation; starting anonymous"
                    );
                    None
                }
            },
            None => self.read_profile(),
        };

        match profile {
            Some(profile) => {
                self.set_session(token, profile);
                SessionState::Authenticated
            }
            None => {
                self.clear_session();
                SessionState::Anonymous
            }
        }
    }

    /// Install a new session in memory and in durable storage.
    pub fn set_session(&self, token: impl Into<String>, profile: Profile) {
        let credentials = Credentials {
            token: token.into(),
            profile,
        };
        self.write(TOKEN_KEY, &credentials.token);
        self.write_profile(&credentials.profile);

        info!(
            event_name = "session.established",
            event_domain = "session",
            user_id = credentials.profile.id,
            "session established"
        );
        self.current.send_replace(Session {
            state: SessionState::Authenticated,
            credentials: Some(credentials),
        });
    }

    /// Drop the session from memory and durable storage. Clearing an empty
    /// session is a no-op.
    pub fn clear_session(&self) {
        let had_credentials = self.current.send_if_modified(|s| {
            let changed = s.credentials.is_some() || s.state != SessionState::Anonymous;
            s.credentials = None;
            s.state = SessionState::Anonymous;
            changed
        });
        self.erase(TOKEN_KEY);
        self.erase(PROFILE_KEY);

        if had_credentials {
            info!(
                event_name = "session.cleared",
                event_domain = "session",
                "session cleared"
            );
        }
    }

    /// Merge `patch` into the current profile. Does nothing while anonymous.
    pub fn update_profile(&self, patch: &ProfileUpdate) -> bool {
        self.modify_profile(|profile| patch.apply_to(profile))
    }

    /// Replace the current profile wholesale. Does nothing while anonymous.
    pub fn replace_profile(&self, profile: Profile) -> bool {
        self.modify_profile(move |current| *current = profile)
    }

    fn modify_profile(&self, f: impl FnOnce(&mut Profile)) -> bool {
        let mut updated = None;
        self.current.send_if_modified(|s| match s.credentials.as_mut() {
            Some(credentials) => {
                f(&mut credentials.profile);
                updated = Some(credentials.profile.clone());
                true
            }
            None => false,
        });
        match updated {
            Some(profile) => {
                self.write_profile(&profile);
                true
            }
            None => false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_authenticated()
    }

    pub fn state(&self) -> SessionState {
        self.current.borrow().state()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().token().map(str::to_string)
    }

    pub fn profile(&self) -> Option<Profile> {
        self.current.borrow().profile().cloned()
    }

    pub fn snapshot(&self) -> Session {
        self.current.borrow().clone()
    }

    /// Observe every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.current.subscribe()
    }

    fn read(&self, key: &str) -> Option<String> {
        if !self.storage.is_enabled() {
            return None;
        }
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read '{}' from session storage: {}", key, e);
                None
            }
        }
    }

    fn read_profile(&self) -> Option<Profile> {
        let raw = self.read(PROFILE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("Discarding unreadable persisted profile: {}", e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if !self.storage.is_enabled() {
            debug!("Session storage disabled; not persisting '{}'.", key);
            return;
        }
        if let Err(e) = self.storage.set(key, value) {
            warn!("Could not persist '{}': {}", key, e);
        }
    }

    fn write_profile(&self, profile: &Profile) {
        match serde_json::to_string(profile) {
            Ok(raw) => self.write(PROFILE_KEY, &raw),
            Err(e) => warn!("Could not encode profile for storage: {}", e),
        }
    }

    fn erase(&self, key: &str) {
        if !self.storage.is_enabled() {
            return;
        }
        if let Err(e) = self.storage.remove(key) {
            warn!("Could not remove '{}' from session storage: {}", key, e);
        }
    }
}
