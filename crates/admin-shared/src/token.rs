use crate::random::{random_alphanumeric, TOKEN_LEN};
use std::fmt::Debug;

/// Opaque bearer credential handed out on login
#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new_rand() -> Self {
        random_alphanumeric(TOKEN_LEN).into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer_header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Extracts the token from an `Authorization` header value.
    ///
    /// Returns `None` if the scheme is not `Bearer` or the token is empty
    pub fn from_bearer_header(value: &str) -> Option<Self> {
        let token = value.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the length is printed so tokens never end up in traces
        f.debug_struct("AuthToken")
            .field("len", &self.0.len())
            .finish()
    }
}
