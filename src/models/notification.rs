use serde::{Deserialize, Serialize};

/// Time zones the reminder scheduler understands, as (IANA id, label).
pub const SUPPORTED_TIMEZONES: &[(&str, &str)] = &[
    ("America/Santo_Domingo", "Dominican Republic (AST)"),
    ("America/New_York", "New York (EST)"),
    ("America/Los_Angeles", "Los Angeles (PST)"),
    ("America/Mexico_City", "Mexico (CST)"),
    ("America/Bogota", "Colombia (COT)"),
    ("America/Lima", "Peru (PET)"),
    ("America/Santiago", "Chile (CLT)"),
    ("America/Argentina/Buenos_Aires", "Argentina (ART)"),
    ("Europe/Madrid", "Spain (CET)"),
    ("Europe/London", "United Kingdom (GMT)"),
];

pub fn is_supported_timezone(tz: &str) -> bool {
    SUPPORTED_TIMEZONES.iter().any(|(id, _)| *id == tz)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreferences {
    #[serde(rename = "notificaciones_activas")]
    pub enabled: bool,
    /// `HH:MM` in the user's time zone.
    #[serde(rename = "hora_recordatorio")]
    pub reminder_time: String,
    pub timezone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPreferencesUpdate {
    #[serde(rename = "notificaciones_activas", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "hora_recordatorio", skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VapidPublicKey {
    #[serde(alias = "publicKey")]
    pub public_key: String,
}

/// A browser push subscription as registered with the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PushSubscriptionRequest {
    pub endpoint: String,
    pub p256dh_key: String,
    pub auth_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub id: i64,
    #[serde(rename = "usuario_id")]
    pub owner_id: i64,
    pub endpoint: String,
    #[serde(rename = "activa", default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TestNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestNotificationOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sent: Option<u32>,
    #[serde(default)]
    pub failed: Option<u32>,
}
