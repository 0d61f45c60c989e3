use reqwest::Method;
use std::fmt::Display;

/// Describes an endpoint. Paths may contain a single `{id}` placeholder which
/// is filled in with [`PathSpec::with_id`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: Method,
}

impl PathSpec {
    const ID_PLACEHOLDER: &'static str = "{id}";

    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    /// Returns the path with the `{id}` placeholder replaced
    pub fn with_id<T: Display>(&self, id: T) -> String {
        debug_assert!(
            self.path.contains(Self::ID_PLACEHOLDER),
            "no placeholder in {:?}",
            self.path
        );
        self.path.replacen(Self::ID_PLACEHOLDER, &id.to_string(), 1)
    }
}
