use crate::token::AuthToken;

use super::UserInfo;

/// The `data` of a successful login envelope
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: AuthToken,
    pub user_info: UserInfo,
}
