use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use super::navigator::Navigator;
use crate::config::{ApiConfig, SessionConfig};
use crate::models::Profile;
use crate::session::{SessionStore, SessionValidator};
use crate::utils::log_throttle::should_emit;

const SESSION_EXPIRED_LOG_WINDOW: Duration = Duration::from_secs(30);

/// Whether a request carries the session's bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Attach the bearer token when one exists; a 401 expires the session.
    #[default]
    Session,
    /// Never attach the token; a 401 is reported like any other failure.
    Public,
}

/// Per-request knobs beyond method, path and body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub auth: AuthMode,
    /// Replace the default headers of the same name.
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn public() -> Self {
        Self {
            auth: AuthMode::Public,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Session-aware JSON client for the habit-tracking backend.
pub struct ApiClient {
    base_url: String,
    login_path: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        api: &ApiConfig,
        session_config: &SessionConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            login_path: session_config.login_path.clone(),
            http: reqwest::Client::new(),
            session,
            navigator,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a session request and decode its JSON response.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with(method, path, body, RequestOptions::default())
            .await
    }

    pub async fn request_with<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body, options).await?;
        decode(response).await
    }

    /// Like [`request_with`](Self::request_with) for endpoints that answer without a body.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body, options).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_empty::<()>(Method::DELETE, path, None, RequestOptions::default())
            .await
    }

    /// Clear the session and send the host to the login page.
    pub fn logout(&self) {
        self.session.clear_session();
        self.navigator.navigate(&self.login_path);
    }

    fn headers(&self, options: &RequestOptions) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if options.auth == AuthMode::Session {
            if let Some(token) = self.session.token() {
                let bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    ApiError::InvalidRequest(format!("token is not a valid header value: {}", e))
                })?;
                headers.insert(AUTHORIZATION, bearer);
            }
        }

        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &options.headers {
            headers.append(name.clone(), value.clone());
        }
        Ok(headers)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(self.headers(&options)?);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(|e| {
                ApiError::InvalidRequest(format!("could not encode request body: {}", e))
            })?;
            builder = builder.body(encoded);
        }

        debug!("Sending {} {}", method, url);
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = error_detail(response).await;
        if status == StatusCode::UNAUTHORIZED {
            return Err(self.reject_unauthorized(options.auth, detail));
        }
        debug!("{} {} failed with {}: {}", method, url, status, detail);
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
            detail,
        })
    }

    // A 401 always ends the session. Only session requests are reported as an
    // expiry; a public request (a wrong password on login) keeps its detail.
    fn reject_unauthorized(&self, auth: AuthMode, detail: String) -> ApiError {
        self.session.clear_session();
        match auth {
            AuthMode::Session => {
                if let Some(suppressed_count) =
                    should_emit("api.session.expired", SESSION_EXPIRED_LOG_WINDOW)
                {
                    warn!(
                        event_name = "api.session.expired",
                        event_domain = "api",
                        detail = detail.as_str(),
                        suppressed_count,
                        "backend rejected the session; redirecting to login"
                    );
                }
                self.navigator.navigate(&self.login_path);
                ApiError::SessionExpired
            }
            AuthMode::Public => ApiError::RequestFailed {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                detail,
            },
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(ApiError::Network)?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::MalformedResponse { status, source })
}

/// Pull the `detail` field out of an error body, falling back to a generic message.
async fn error_detail(response: Response) -> String {
    let status = response.status().as_u16();
    let fallback = || format!("request failed with status {}", status);
    let Ok(raw) = response.text().await else {
        return fallback();
    };
    match serde_json::from_str::<ErrorBody>(&raw) {
        Ok(ErrorBody {
            detail: Some(Value::String(detail)),
        }) => detail,
        // Validation errors carry a list of problems.
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.is_null() => detail.to_string(),
        _ => fallback(),
    }
}

/// Startup validation: fetch `/auth/me` with an explicit token, outside the session.
#[async_trait]
impl SessionValidator for ApiClient {
    async fn validate(&self, token: &str) -> Result<Profile, String> {
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| format!("token is not a valid header value: {}", e))?;
        let options = RequestOptions::public().with_header(AUTHORIZATION, bearer);
        self.request_with::<Profile, ()>(Method::GET, "/auth/me", None, options)
            .await
            .map_err(|e| e.to_string())
    }
}
