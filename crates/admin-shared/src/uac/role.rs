use serde::{Deserialize, Serialize};

use crate::{errors::ConversionError, id::DbId, macros::validated_text};

use super::Permissions;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: DbId,
    pub name: RoleName,
    pub key: RoleKey,
    #[serde(default)]
    pub description: RoleDescription,
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: RoleName,
    pub key: RoleKey,
    #[serde(default)]
    pub description: RoleDescription,
    #[serde(default)]
    pub permissions: Permissions,
}

impl Role {
    pub fn from_draft(id: DbId, draft: RoleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            key: draft.key,
            description: draft.description,
            permissions: draft.permissions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

/// Machine readable identifier of a role such as `admin`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct RoleKey(String);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(try_from = "String", into = "String")]
pub struct RoleDescription(String);

impl RoleName {
    pub const MAX_LENGTH: usize = 30;
}

impl RoleKey {
    pub const MAX_LENGTH: usize = 30;
}

impl RoleDescription {
    pub const MAX_LENGTH: usize = 200;
}

fn check_role_key(value: &str) -> Result<(), ConversionError> {
    ConversionError::check_required(value, RoleKey::MAX_LENGTH)?;
    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-')))
    {
        Some(c) => Err(ConversionError::InvalidFormat(format!(
            "{c:?} is not allowed in role key {value:?}, use ascii letters, digits, '_' or '-'"
        ))),
        None => Ok(()),
    }
}

validated_text!(RoleName, |value| ConversionError::check_required(
    value,
    RoleName::MAX_LENGTH
));
validated_text!(RoleKey, check_role_key);
validated_text!(RoleDescription, |value| ConversionError::check_max_len(
    value,
    RoleDescription::MAX_LENGTH
));

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(31), ConversionError::MaxExceeded{max:30, actual:31})]
    fn illegal_role_names(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<RoleName, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[rstest]
    #[case::space("super admin")]
    #[case::colon("system:admin")]
    fn illegal_role_keys(#[case] key: &str) {
        let actual: Result<RoleKey, ConversionError> = key.try_into();
        assert!(matches!(actual, Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn illegal_role_description() {
        // Act
        let actual: Result<RoleDescription, ConversionError> = "a".repeat(201).try_into();

        // Assert
        assert_eq!(
            actual.unwrap_err(),
            ConversionError::MaxExceeded {
                max: 200,
                actual: 201
            }
        );
    }
}
