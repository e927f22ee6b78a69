use reqwest::Method;
use tracing::debug;

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use crate::models::{LoginRequest, Profile, ProfileUpdate, RegisterRequest, TokenResponse};

/// Account endpoints. Login and registration establish the session on success.
impl ApiClient {
    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let response: TokenResponse = self
            .request_with(
                Method::POST,
                "/auth/register",
                Some(request),
                RequestOptions::public(),
            )
            .await?;
        self.session()
            .set_session(response.access_token.clone(), response.user.clone());
        Ok(response)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let response: TokenResponse = self
            .request_with(
                Method::POST,
                "/auth/login",
                Some(request),
                RequestOptions::public(),
            )
            .await?;
        self.session()
            .set_session(response.access_token.clone(), response.user.clone());
        Ok(response)
    }

    /// Fetch the logged-in user and refresh the session's copy of the profile.
    pub async fn current_user(&self) -> Result<Profile, ApiError> {
        let profile: Profile = self.get("/auth/me").await?;
        self.session().replace_profile(profile.clone());
        Ok(profile)
    }

    /// Apply `update` on the backend. An empty update is answered from the
    /// session without a round trip.
    pub async fn update_current_user(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        if update.is_empty() {
            if let Some(profile) = self.session().profile() {
                debug!("Empty profile update; nothing to send.");
                return Ok(profile);
            }
        }
        let profile: Profile = self.put("/auth/me", update).await?;
        self.session().replace_profile(profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::api::navigator::RedirectSlot;
    use crate::api::ApiClient;
    use crate::config::{ApiConfig, SessionConfig};
    use crate::models::{LoginRequest, ProfileUpdate, RegisterRequest};
    use crate::session::{SessionStore, PROFILE_KEY, TOKEN_KEY};
    use crate::store::{KeyValueStore, MemoryStore};

    fn client(base_url: String) -> (ApiClient, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionStore::new(storage.clone()));
        let api = ApiClient::new(
            &ApiConfig { base_url },
            &SessionConfig::default(),
            session,
            Arc::new(RedirectSlot::new()),
        );
        (api, storage)
    }

    const ANA: &str = r#"{"id": 1, "nombre": "Ana", "email": "a@x.com", "ver_futuro": false}"#;

    #[tokio::test]
    async fn test_login_establishes_and_persists_session() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/login")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Json(json!({"email": "a@x.com", "password": "secret"})))
            .with_status(200)
            .with_body(format!(
                r#"{{"access_token": "tok1", "token_type": "bearer", "user": {}}}"#,
                ANA
            ))
            .create_async()
            .await;

        let (api, storage) = client(server.url());
        let response = api
            .login(&LoginRequest::new("a@x.com", "secret"))
            .await
            .unwrap();
        m.assert_async().await;

        assert_eq!(response.access_token, "tok1");
        assert_eq!(api.session().token().as_deref(), Some("tok1"));
        assert_eq!(api.session().profile().unwrap().email, "a@x.com");
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok1"));
        let stored: serde_json::Value =
            serde_json::from_str(&storage.get(PROFILE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored["id"], 1);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_anonymous() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Email o contraseña incorrectos"}"#)
            .create_async()
            .await;

        let (api, storage) = client(server.url());
        let err = api
            .login(&LoginRequest::new("a@x.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(!api.session().is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_spanish_fields() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/register")
            .match_body(Matcher::PartialJson(json!({"nombre": "Ana", "email": "a@x.com"})))
            .with_status(201)
            .with_body(format!(r#"{{"access_token": "tok2", "usuario": {}}}"#, ANA))
            .create_async()
            .await;

        let (api, _) = client(server.url());
        let request = RegisterRequest {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password: "secret".to_string(),
            show_future: None,
        };
        api.register(&request).await.unwrap();
        m.assert_async().await;
        assert_eq!(api.session().token().as_deref(), Some("tok2"));
    }

    #[tokio::test]
    async fn test_update_current_user_replaces_session_profile() {
        let mut server = Server::new_async().await;
        server
            .mock("PUT", "/auth/me")
            .match_header("authorization", "Bearer tok1")
            .match_body(Matcher::Json(json!({"ver_futuro": true})))
            .with_status(200)
            .with_body(r#"{"id": 1, "nombre": "Ana", "email": "a@x.com", "ver_futuro": true}"#)
            .create_async()
            .await;

        let (api, _) = client(server.url());
        api.session()
            .set_session("tok1", serde_json::from_str(ANA).unwrap());
        let updated = api
            .update_current_user(&ProfileUpdate::default().show_future(true))
            .await
            .unwrap();
        assert!(updated.show_future);
        assert!(api.session().profile().unwrap().show_future);
    }

    #[tokio::test]
    async fn test_empty_profile_update_skips_backend() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/auth/me")
            .with_status(200)
            .with_body(ANA)
            .expect(0)
            .create_async()
            .await;

        let (api, _) = client(server.url());
        api.session()
            .set_session("tok1", serde_json::from_str(ANA).unwrap());
        let profile = api
            .update_current_user(&ProfileUpdate::default())
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(profile.name, "Ana");
    }

    #[tokio::test]
    async fn test_current_user_refreshes_profile() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_body(r#"{"id": 1, "nombre": "Ana María", "email": "a@x.com"}"#)
            .create_async()
            .await;

        let (api, _) = client(server.url());
        api.session()
            .set_session("tok1", serde_json::from_str(ANA).unwrap());
        api.current_user().await.unwrap();
        assert_eq!(api.session().profile().unwrap().name, "Ana María");
    }
}
