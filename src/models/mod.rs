//! Records exchanged with the habit-tracking backend.
pub mod habit;
pub mod notification;
pub mod record;
pub mod token;
pub mod user;

pub use habit::{Category, Habit, HabitUpdate, NewHabit};
pub use notification::{
    NotificationPreferences, NotificationPreferencesUpdate, PushSubscription,
    PushSubscriptionRequest, TestNotification, TestNotificationOutcome, VapidPublicKey,
    SUPPORTED_TIMEZONES,
};
pub use record::{DailyRecord, DailyRecordWithProgress, Progress, ProgressUpdate};
pub use token::{LoginRequest, RegisterRequest, TokenResponse};
pub use user::{Profile, ProfileUpdate};
