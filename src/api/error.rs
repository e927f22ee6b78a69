/// Everything that can go wrong talking to the backend.
///
/// The client never recovers on its own; callers decide how to present these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401 to a session request. The session has already
    /// been cleared and the host sent to the login page.
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("request failed with status {status}: {detail}")]
    RequestFailed { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response body (status {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status the error came with, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::RequestFailed { status, .. } | ApiError::MalformedResponse { status, .. } => {
                Some(*status)
            }
            ApiError::Network(_) | ApiError::InvalidRequest(_) => None,
        }
    }

    /// Human-readable detail from the backend's error body.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::RequestFailed { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}
