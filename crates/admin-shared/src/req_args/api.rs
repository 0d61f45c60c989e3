use secrecy::SecretString;

use crate::uac::{Permissions, UserDraft, UserStatus};

#[derive(Debug, serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewUserReqArgs {
    #[serde(flatten)]
    pub user: UserDraft,
    pub password: SecretString,
}

#[derive(Debug, serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetReqArgs {
    pub new_password: SecretString,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct UserStatusReqArgs {
    pub status: UserStatus,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct RolePermissionsReqArgs {
    pub permissions: Permissions,
}
