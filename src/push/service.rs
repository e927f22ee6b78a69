use std::sync::{Arc, Mutex, PoisonError};

use cached::{Cached, TimedCache};
use tracing::{debug, info};

use super::platform::{Permission, PushPlatform};
use super::vapid::decode_application_server_key;
use crate::api::{ApiClient, ApiError};
use crate::models::{
    NotificationPreferences, NotificationPreferencesUpdate, PushSubscription,
    PushSubscriptionRequest, TestNotification, TestNotificationOutcome,
};

/// The server's VAPID key rarely changes; refetch it at most hourly.
const VAPID_KEY_LIFESPAN_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("push messaging is not supported on this platform")]
    Unsupported,
    #[error("notification permission was not granted ({0})")]
    PermissionDenied(Permission),
    #[error("invalid VAPID public key: {0}")]
    InvalidVapidKey(#[from] base64::DecodeError),
    #[error("no active session")]
    NotAuthenticated,
    #[error("push platform error: {0}")]
    Platform(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Registers this device for push messages and manages notification settings.
pub struct PushService {
    api: Arc<ApiClient>,
    platform: Arc<dyn PushPlatform>,
    vapid_cache: Mutex<TimedCache<String, String>>,
}

impl PushService {
    pub fn new(api: Arc<ApiClient>, platform: Arc<dyn PushPlatform>) -> Self {
        Self {
            api,
            platform,
            vapid_cache: Mutex::new(TimedCache::with_lifespan(VAPID_KEY_LIFESPAN_SECS)),
        }
    }

    /// Ask for permission if needed, subscribe on the platform and register
    /// the subscription with the backend.
    pub async fn subscribe(&self) -> Result<PushSubscription, PushError> {
        if !self.platform.is_supported() {
            return Err(PushError::Unsupported);
        }

        let permission = match self.platform.permission() {
            Permission::Prompt => self.platform.request_permission().await,
            other => other,
        };
        if permission != Permission::Granted {
            return Err(PushError::PermissionDenied(permission));
        }

        let key = self.vapid_public_key().await?;
        let application_server_key = decode_application_server_key(&key)?;
        let keys = self
            .platform
            .subscribe(&application_server_key)
            .await
            .map_err(PushError::Platform)?;
        debug!("Platform push subscription at {}", keys.endpoint);

        if !self.api.session().is_authenticated() {
            return Err(PushError::NotAuthenticated);
        }
        let subscription = self
            .api
            .subscribe_push(&PushSubscriptionRequest {
                endpoint: keys.endpoint,
                p256dh_key: keys.p256dh,
                auth_key: keys.auth,
                user_agent: self.platform.user_agent(),
            })
            .await?;

        info!(
            event_name = "push.subscribed",
            event_domain = "push",
            subscription_id = subscription.id,
            "push subscription registered"
        );
        Ok(subscription)
    }

    /// Drop the platform subscription and tell the backend, if logged in.
    /// Returns `false` when there was nothing to unsubscribe.
    pub async fn unsubscribe(&self) -> Result<bool, PushError> {
        let Some(current) = self
            .platform
            .current_subscription()
            .await
            .map_err(PushError::Platform)?
        else {
            debug!("No platform push subscription to cancel.");
            return Ok(false);
        };

        self.platform
            .unsubscribe()
            .await
            .map_err(PushError::Platform)?;
        if self.api.session().is_authenticated() {
            self.api.unsubscribe_push(&current.endpoint).await?;
        }
        info!(
            event_name = "push.unsubscribed",
            event_domain = "push",
            "push subscription cancelled"
        );
        Ok(true)
    }

    /// Whether the platform holds a push subscription for this app.
    pub async fn is_subscribed(&self) -> Result<bool, PushError> {
        if !self.platform.is_supported() {
            return Ok(false);
        }
        let current = self
            .platform
            .current_subscription()
            .await
            .map_err(PushError::Platform)?;
        Ok(current.is_some())
    }

    pub async fn preferences(&self) -> Result<NotificationPreferences, PushError> {
        self.require_session()?;
        Ok(self.api.notification_preferences().await?)
    }

    pub async fn update_preferences(
        &self,
        patch: &NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences, PushError> {
        self.require_session()?;
        Ok(self.api.update_notification_preferences(patch).await?)
    }

    pub async fn send_test(
        &self,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<TestNotificationOutcome, PushError> {
        self.require_session()?;
        let notification = TestNotification {
            title: title.map(str::to_string),
            body: body.map(str::to_string),
        };
        Ok(self.api.send_test_notification(&notification).await?)
    }

    fn require_session(&self) -> Result<(), PushError> {
        if self.api.session().is_authenticated() {
            Ok(())
        } else {
            Err(PushError::NotAuthenticated)
        }
    }

    async fn vapid_public_key(&self) -> Result<String, PushError> {
        let cache_key = self.api.base_url().to_string();
        let cached = self
            .vapid_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_get(&cache_key)
            .cloned();
        if let Some(key) = cached {
            return Ok(key);
        }

        let key = self.api.vapid_public_key().await?;
        self.vapid_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_set(cache_key, key.clone());
        Ok(key)
    }
}
