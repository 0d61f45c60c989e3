use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt::{Debug, Display},
};
use tracing::instrument;

use crate::{const_config::permission::PERM_SUPERUSER, errors::ConversionError};

/// A colon separated permission code such as `system:user:list`.
///
/// A trailing `*` segment grants every code sharing the preceding prefix and
/// the code `*` on its own grants everything
#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PermissionCode(String);

impl PermissionCode {
    pub const SEPARATOR: char = ':';
    pub const WILDCARD: &'static str = "*";
    pub const MAX_LENGTH: usize = 100;

    /// Suffix of the codes that make a route visible to route checks
    const LIST_SUFFIX: &'static str = ":list";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_superuser(&self) -> bool {
        self.0 == PERM_SUPERUSER
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD || self.0.ends_with(":*")
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATOR)
    }

    /// Derives the code guarding a route, `/system/user` becomes `system:user`
    pub fn route_code(path: &str) -> String {
        let code = path.replace('/', ":");
        match code.strip_prefix(Self::SEPARATOR) {
            Some(stripped) => stripped.to_string(),
            None => code,
        }
    }
}

impl TryFrom<String> for PermissionCode {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConversionError::check_required(&value, Self::MAX_LENGTH)?;
        if value.chars().any(char::is_whitespace) {
            return Err(ConversionError::InvalidFormat(format!(
                "whitespace found in {value:?}"
            )));
        }
        let segment_count = value.split(Self::SEPARATOR).count();
        for (i, segment) in value.split(Self::SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(ConversionError::InvalidFormat(format!(
                    "empty segment in {value:?}"
                )));
            }
            if segment.contains(Self::WILDCARD)
                && (segment != Self::WILDCARD || i + 1 != segment_count)
            {
                return Err(ConversionError::InvalidFormat(format!(
                    "wildcard is only allowed as the whole last segment in {value:?}"
                )));
            }
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for PermissionCode {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl Borrow<str> for PermissionCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// The set of permission codes held by a user.
///
/// This is an immutable snapshot as far as checks are concerned, all checks
/// are pure functions of the set and the requested code
#[derive(serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Permissions(pub BTreeSet<PermissionCode>);

impl Permissions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// Decides if `requested_code` is granted.
    ///
    /// Grants are checked in order: superuser `*`, exact match, then the
    /// wildcard of every shorter prefix (`system:user:*` then `system:*`).
    /// Route checks additionally pass if any held `...:list` code starts with
    /// the requested code, so directory routes without a code of their own
    /// stay visible to users that can list something below them
    #[instrument(ret, level = "trace")]
    pub fn is_allowed(&self, requested_code: &str, is_route_check: bool) -> bool {
        if requested_code.is_empty() || self.is_empty() {
            return false;
        }
        if self.contains(PERM_SUPERUSER) || self.contains(requested_code) {
            return true;
        }

        let segments: Vec<&str> = requested_code.split(PermissionCode::SEPARATOR).collect();
        for i in (1..segments.len()).rev() {
            let prefix = format!(
                "{}{}{}",
                segments[..i].join(":"),
                PermissionCode::SEPARATOR,
                PermissionCode::WILDCARD
            );
            if self.contains(&prefix) {
                return true;
            }
        }

        is_route_check
            && self.0.iter().any(|code| {
                code.as_str().ends_with(PermissionCode::LIST_SUFFIX)
                    && code.as_str().starts_with(requested_code)
            })
    }

    /// True if at least one of the codes is allowed as an action
    pub fn has_any<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|code| self.is_allowed(code.as_ref(), false))
    }

    /// True if every code is allowed as an action. An empty list is allowed
    pub fn has_all<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().all(|code| self.is_allowed(code.as_ref(), false))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Permissions {
    /// Builds the set without validating the codes, as they would be received
    /// from the server
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|code| PermissionCode(code.as_ref().to_string()))
                .collect(),
        )
    }
}

impl From<Vec<PermissionCode>> for Permissions {
    fn from(value: Vec<PermissionCode>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl Debug for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Permissions").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn perms(codes: &[&str]) -> Permissions {
        codes.iter().collect()
    }

    #[rstest]
    #[case::exact("system:user:list")]
    #[case::single_segment("dashboard")]
    #[case::deep("system:user:export:excel")]
    #[case::unknown("anything:at:all")]
    fn superuser_allows_everything(#[case] code: &str) {
        let p = perms(&["*"]);
        assert!(p.is_allowed(code, false));
        assert!(p.is_allowed(code, true));
    }

    #[rstest]
    #[case::action("system:user:list", false)]
    #[case::route("system:user", true)]
    #[case::superuser_code("*", false)]
    #[case::empty_code("", true)]
    fn empty_set_denies_everything(#[case] code: &str, #[case] is_route_check: bool) {
        assert!(!Permissions::default().is_allowed(code, is_route_check));
    }

    #[test]
    fn empty_code_is_denied_even_for_superuser() {
        assert!(!perms(&["*"]).is_allowed("", false));
        assert!(!perms(&["*"]).is_allowed("", true));
    }

    #[rstest]
    #[case::list("system:user:list", true)]
    #[case::delete("system:user:delete", true)]
    #[case::create("system:user:create", true)]
    #[case::nested_deeper("system:user:export:excel", true)]
    #[case::other_resource("system:role:list", false)]
    #[case::parent("system:user", false)]
    fn resource_wildcard(#[case] code: &str, #[case] expected: bool) {
        let p = perms(&["system:user:*"]);
        assert_eq!(p.is_allowed(code, false), expected);
    }

    #[rstest]
    #[case("system:log:export", true)]
    #[case("system:user:list", true)]
    #[case("monitor:online:list", false)]
    fn module_wildcard(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(perms(&["system:*"]).is_allowed(code, false), expected);
    }

    #[test]
    fn exact_match_only() {
        let p = perms(&["system:user:list"]);
        assert!(p.is_allowed("system:user:list", false));
        assert!(!p.is_allowed("system:user:delete", false));
    }

    #[test]
    fn list_suffix_only_applies_to_route_checks() {
        let p = perms(&["system:user:list"]);
        assert!(p.is_allowed("system:user", true));
        assert!(!p.is_allowed("system:user", false));
        assert!(p.is_allowed("system", true));
        assert!(!p.is_allowed("system:role", true));
    }

    #[test]
    fn list_suffix_requires_list_code() {
        let p = perms(&["system:user:create"]);
        assert!(!p.is_allowed("system:user", true));
    }

    #[test]
    fn single_segment_skips_prefix_wildcards() {
        // `system:*` must not grant the bare `system` code
        let p = perms(&["system:*"]);
        assert!(!p.is_allowed("system", false));
    }

    #[test]
    fn has_any_and_has_all() {
        let p = perms(&["system:user:list", "system:role:*"]);
        assert!(p.has_any(&["system:user:delete", "system:role:delete"]));
        assert!(!p.has_any(&["system:user:delete", "system:menu:list"]));
        assert!(p.has_all(&["system:user:list", "system:role:update"]));
        assert!(!p.has_all(&["system:user:list", "system:user:delete"]));
        assert!(p.has_all::<&str>(&[]));
    }

    #[rstest]
    #[case::simple("system:user:list")]
    #[case::wildcard("system:user:*")]
    #[case::superuser("*")]
    #[case::single("dashboard")]
    fn valid_codes(#[case] code: &str) {
        let actual: Result<PermissionCode, _> = code.try_into();
        assert_eq!(actual.unwrap().as_str(), code);
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(101), ConversionError::MaxExceeded { max: 100, actual: 101 })]
    fn illegal_code_lengths(#[case] code: String, #[case] expected: ConversionError) {
        let actual: Result<PermissionCode, _> = code.try_into();
        assert_eq!(actual.unwrap_err(), expected);
    }

    #[rstest]
    #[case::empty_segment("system::list")]
    #[case::trailing_separator("system:user:")]
    #[case::wildcard_in_middle("system:*:list")]
    #[case::partial_wildcard("system:user*")]
    #[case::whitespace("system:user list")]
    fn malformed_codes(#[case] code: &str) {
        let actual: Result<PermissionCode, _> = code.try_into();
        assert!(
            matches!(actual, Err(ConversionError::InvalidFormat(_))),
            "{actual:?}"
        );
    }

    #[test]
    fn serializes_as_list_of_strings() {
        let p = perms(&["system:user:list", "*"]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"["*","system:user:list"]"#);
        let back: Permissions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
