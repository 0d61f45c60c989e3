use crate::{
    token::AuthToken,
    uac::{Permissions, UserInfo},
};

/// Authentication state of the console. Serialized as is into durable client
/// storage
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub token: Option<AuthToken>,
    pub user_info: Option<UserInfo>,
}

impl SessionState {
    /// Without a token the user is unauthenticated no matter what user info is
    /// cached
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Permissions to check against, empty unless authenticated
    pub fn effective_permissions(&self) -> Permissions {
        match (&self.token, &self.user_info) {
            (Some(_), Some(user_info)) => user_info.permissions.clone(),
            _ => Permissions::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user_info.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_info() -> UserInfo {
        UserInfo {
            id: 1.into(),
            username: "admin".try_into().unwrap(),
            display_name: "Admin".try_into().unwrap(),
            email: None,
            roles: vec![],
            permissions: ["*"].iter().collect(),
        }
    }

    #[test]
    fn cached_user_info_without_token_has_no_permissions() {
        let state = SessionState {
            token: None,
            user_info: Some(user_info()),
        };
        assert!(!state.is_authenticated());
        assert!(state.effective_permissions().is_empty());
    }

    #[test]
    fn authenticated_state_exposes_permissions() {
        let state = SessionState {
            token: Some(AuthToken::new_rand()),
            user_info: Some(user_info()),
        };
        assert!(state.is_authenticated());
        assert!(state
            .effective_permissions()
            .is_allowed("system:user:list", false));
    }
}
