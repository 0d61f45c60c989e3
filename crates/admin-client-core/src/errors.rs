use admin_shared::const_config::client::notify::{
    NOTIFY_MALFORMED_RESPONSE, NOTIFY_NETWORK_ERROR, NOTIFY_REQUEST_FAILED, NOTIFY_SERVER_ERROR,
    NOTIFY_SESSION_EXPIRED,
};

/// Failure of a single call made through [`crate::Client`]
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("session expired: {message}")]
    Unauthorized { message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("{message} (code {code})")]
    Application {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("failed to reach server: {0}")]
    Transport(String),
    #[error("request cancelled")]
    Cancelled,
}

impl RequestError {
    /// Returns `true` if the request was swept because the session expired
    /// elsewhere. These are never reported to the user
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The envelope code for application errors
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { .. } => NOTIFY_SESSION_EXPIRED.to_string(),
            Self::Server { .. } => NOTIFY_SERVER_ERROR.to_string(),
            Self::Http { message, .. } | Self::Application { message, .. } => {
                if message.is_empty() {
                    NOTIFY_REQUEST_FAILED.to_string()
                } else {
                    message.clone()
                }
            }
            Self::Malformed(_) => NOTIFY_MALFORMED_RESPONSE.to_string(),
            Self::Transport(_) => NOTIFY_NETWORK_ERROR.to_string(),
            Self::Cancelled => String::new(),
        }
    }
}
