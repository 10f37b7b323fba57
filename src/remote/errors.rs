use thiserror::Error;

use crate::dto::list::{ErrorInfo, ErrorKind};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// The backend answered with `status != 1`.
    #[error("Request rejected: {0}")]
    Application(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unexpected envelope: {0}")]
    UnexpectedEnvelope(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

impl RemoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemoteError::Network(_) => ErrorKind::Network,
            RemoteError::Timeout => ErrorKind::Timeout,
            RemoteError::Application(_) | RemoteError::Unauthorized => ErrorKind::Application,
            RemoteError::UnexpectedEnvelope(_) | RemoteError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Message suitable for an alert or inline form error.
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Application(message) => message.clone(),
            RemoteError::Unauthorized => "Your session has expired, please sign in again".into(),
            RemoteError::Timeout => "The server took too long to respond".into(),
            RemoteError::Network(_) => "Could not reach the server".into(),
            RemoteError::UnexpectedEnvelope(_) | RemoteError::Decode(_) => {
                "The server sent an unexpected response".into()
            }
        }
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo::new(self.kind(), self.user_message())
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return RemoteError::Timeout;
        }
        if err.is_decode() {
            return RemoteError::Decode(err.to_string());
        }
        if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return RemoteError::Unauthorized;
        }
        RemoteError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}
