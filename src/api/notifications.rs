use reqwest::Method;

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use crate::models::{
    NotificationPreferences, NotificationPreferencesUpdate, PushSubscription,
    PushSubscriptionRequest, TestNotification, TestNotificationOutcome, VapidPublicKey,
};

impl ApiClient {
    /// The application server key push subscriptions must be created with.
    pub async fn vapid_public_key(&self) -> Result<String, ApiError> {
        let key: VapidPublicKey = self
            .request_with::<_, ()>(
                Method::GET,
                "/notifications/vapid-public-key",
                None,
                RequestOptions::public(),
            )
            .await?;
        Ok(key.public_key)
    }

    pub async fn subscribe_push(
        &self,
        subscription: &PushSubscriptionRequest,
    ) -> Result<PushSubscription, ApiError> {
        self.post("/notifications/subscribe", subscription).await
    }

    pub async fn unsubscribe_push(&self, endpoint: &str) -> Result<(), ApiError> {
        self.request_empty::<()>(
            Method::DELETE,
            "/notifications/unsubscribe",
            None,
            RequestOptions::default().with_query("endpoint", endpoint),
        )
        .await
    }

    pub async fn notification_preferences(&self) -> Result<NotificationPreferences, ApiError> {
        self.get("/notifications/preferences").await
    }

    pub async fn update_notification_preferences(
        &self,
        patch: &NotificationPreferencesUpdate,
    ) -> Result<NotificationPreferences, ApiError> {
        self.put("/notifications/preferences", patch).await
    }

    pub async fn send_test_notification(
        &self,
        notification: &TestNotification,
    ) -> Result<TestNotificationOutcome, ApiError> {
        self.post("/notifications/test", notification).await
    }
}
