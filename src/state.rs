//! The application root.
//!
//! Owns the session store, the API client and the redirect slot they share,
//! and hands them out to the rest of the host.

use std::sync::Arc;

use crate::api::{ApiClient, RedirectSlot};
use crate::config::ConfigV1;
use crate::session::{RouteDecision, RouteGuard, SessionState, SessionStore, SessionValidator};
use crate::store::{create_store, KeyValueStore, StoreError};

/// Everything a host needs to talk to the backend as the current user.
#[derive(Clone)]
pub struct HabitClient {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Durable storage the session is mirrored to.
    pub storage: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    /// Redirects requested by the client, waiting for the host to act on them.
    pub redirects: Arc<RedirectSlot>,
    guard: RouteGuard,
}

impl HabitClient {
    /// Wire up storage, session and API client from configuration.
    ///
    /// The session starts `Uninitialized`; call [`initialize`](Self::initialize)
    /// before serving routes.
    pub fn new(config: Arc<ConfigV1>) -> Result<Self, StoreError> {
        let storage = create_store(&config.store)?;
        Ok(Self::with_storage(config, storage))
    }

    /// Like [`new`](Self::new) with an already constructed store.
    pub fn with_storage(config: Arc<ConfigV1>, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = Arc::new(SessionStore::new(storage.clone()));
        let redirects = Arc::new(RedirectSlot::new());
        let api = Arc::new(ApiClient::new(
            &config.api,
            &config.session,
            session.clone(),
            redirects.clone(),
        ));
        let guard = RouteGuard::new(&config.session);
        Self {
            config,
            storage,
            session,
            api,
            redirects,
            guard,
        }
    }

    /// Restore the persisted session, re-validating the token when configured to.
    pub async fn initialize(&self) -> SessionState {
        let validator: Option<&dyn SessionValidator> = if self.config.session.validate_on_startup {
            Some(self.api.as_ref())
        } else {
            None
        };
        self.session.initialize(validator).await
    }

    /// Decide whether the current user may open `path`.
    pub fn route_guard(&self, path: &str) -> RouteDecision {
        self.guard.check(path, self.session.is_authenticated())
    }
}
