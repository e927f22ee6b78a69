use serde::{Deserialize, Serialize};

/// The `Profile` struct is the logged-in user's record as the backend returns it.
///
/// The backend speaks Spanish field names; English aliases are accepted on input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    pub email: String,
    /// Whether the user wants to see future days in the tracker.
    #[serde(rename = "ver_futuro", alias = "show_future", default)]
    pub show_future: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A partial update to a [`Profile`]. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "ver_futuro", skip_serializing_if = "Option::is_none")]
    pub show_future: Option<bool>,
    /// Only meaningful to the backend; never stored locally.
    #[serde(rename = "contrasena", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn show_future(mut self, show_future: bool) -> Self {
        self.show_future = Some(show_future);
        self
    }

    /// Merge the present fields into `profile`.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(show_future) = self.show_future {
            profile.show_future = show_future;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.show_future.is_none()
            && self.password.is_none()
    }
}
