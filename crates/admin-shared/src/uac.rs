//! Shared items related to user account control

mod errors;
mod menu;
mod permissions;
mod responses;
mod role;
mod user;

pub use errors::{AuthError, PermissionsError};
pub use menu::RouteNode;
pub use permissions::{PermissionCode, Permissions};
pub use responses::LoginResponse;
pub use role::{Role, RoleDescription, RoleDraft, RoleKey, RoleName};
pub use user::{DisplayName, User, UserDraft, UserInfo, UserStatus, Username};
