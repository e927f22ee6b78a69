use serde::{Deserialize, Serialize};

use super::user::Profile;

/// Credentials posted to `/auth/login`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Payload posted to `/auth/register`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "ver_futuro", skip_serializing_if = "Option::is_none")]
    pub show_future: Option<bool>,
}

/// What the backend hands back after a successful login or registration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(alias = "usuario")]
    pub user: Profile,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response_accepts_usuario_envelope() {
        let parsed: TokenResponse = serde_json::from_value(json!({
            "access_token": "tok1",
            "token_type": "bearer",
            "usuario": {"id": 3, "nombre": "Ana", "email": "a@x.com", "ver_futuro": false}
        }))
        .unwrap();
        assert_eq!(parsed.access_token, "tok1");
        assert_eq!(parsed.user.id, 3);
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let parsed: TokenResponse = serde_json::from_value(json!({
            "access_token": "tok1",
            "user": {"id": 3, "name": "Ana", "email": "a@x.com"}
        }))
        .unwrap();
        assert_eq!(parsed.token_type, "bearer");
    }

    #[test]
    fn test_register_request_uses_backend_names() {
        let body = serde_json::to_value(RegisterRequest {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password: "secret".to_string(),
            show_future: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"nombre": "Ana", "email": "a@x.com", "password": "secret"})
        );
    }
}
