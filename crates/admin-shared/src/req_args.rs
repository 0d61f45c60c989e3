//! Request bodies and query strings. [`api`] is laid out after the endpoint
//! paths, `/api/system/users/{id}/password` takes [`api::PasswordResetReqArgs`].
//! Types holding a secret are not `Serialize`, the client writes their json
//! by hand

use secrecy::{ExposeSecret as _, SecretString};

pub mod api;

/// Credentials posted to the login endpoint
#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        let username = username.into();
        Self { username, password }
    }
}

impl std::fmt::Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.expose_secret().is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

/// Query sent to listing endpoints. Filtering and paging are interpreted by
/// the backend, the client only passes them through
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn page(mut self, page: u64, page_size: u64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn keyword<S: Into<String>>(mut self, keyword: S) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let args = LoginReqArgs::new("admin", SecretString::from("hunter2".to_string()));

        let printed = format!("{args:?}");

        assert!(printed.contains("admin"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("hunter2"));
    }
}
