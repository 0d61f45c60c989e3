use chrono::{DateTime, Utc};

use crate::{errors::ConversionError, id::DbId, macros::validated_text};

use super::{Permissions, RoleKey};

/// Login name of a user, never empty
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl Username {
    pub const MAX_LENGTH: usize = 30;
}

impl DisplayName {
    pub const MAX_LENGTH: usize = 50;
}

validated_text!(Username, |value| ConversionError::check_required(
    value,
    Username::MAX_LENGTH
));
validated_text!(DisplayName, |value| ConversionError::check_required(
    value,
    DisplayName::MAX_LENGTH
));

/// Stores the user info that is returned on login and by the user info
/// endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: DbId,
    pub username: Username,
    pub display_name: DisplayName,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleKey>,
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

/// A user as shown on the user management screen
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: Username,
    pub display_name: DisplayName,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub role_ids: Vec<DbId>,
    pub created_at: DateTime<Utc>,
}

/// The editable fields of a [`User`]
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: Username,
    pub display_name: DisplayName,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub role_ids: Vec<DbId>,
}

impl User {
    pub fn from_draft(id: DbId, draft: UserDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username: draft.username,
            display_name: draft.display_name,
            email: draft.email,
            phone: draft.phone,
            status: draft.status,
            role_ids: draft.role_ids,
            created_at,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status == UserStatus::Enabled
    }
}
