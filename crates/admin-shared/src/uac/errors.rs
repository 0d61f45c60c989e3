/// Reasons a login attempt is refused by the backend
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("wrong username or password")]
    InvalidUserOrPassword,
    #[error("this account has been disabled")]
    NotEnabled,
    #[error("login failed unexpectedly")]
    UnexpectedError(#[from] anyhow::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PermissionsError {
    /// Holds the code of the permission the caller lacks
    #[error("permission {0} is required")]
    MissingPermission(String),
}
