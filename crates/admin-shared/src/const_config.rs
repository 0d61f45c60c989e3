//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8789";

    /// Namespace the session is persisted under in durable client storage
    pub const CLIENT_STORE_NAME: &str = "admin-console-session";

    pub mod notify {
        pub const NOTIFY_SESSION_EXPIRED: &str = "Session expired, please log in again";
        pub const NOTIFY_SERVER_ERROR: &str = "Server error, please try again later";
        pub const NOTIFY_REQUEST_FAILED: &str = "Request failed";
        pub const NOTIFY_MALFORMED_RESPONSE: &str = "Unexpected response from server";
        pub const NOTIFY_NETWORK_ERROR: &str = "Unable to reach the server";
    }
}

/// Where binaries and tests write their trace files
pub mod telemetry {
    pub const TELEMETRY_TRACES_DIR: &str = "traces";
}

/// Values used in the `code` field of the response envelope
pub mod envelope_code {
    pub const CODE_SUCCESS: i64 = 0;
    pub const CODE_BAD_REQUEST: i64 = 400;
    pub const CODE_FORBIDDEN: i64 = 403;
    pub const CODE_NOT_FOUND: i64 = 404;
    pub const CODE_LOGIN_FAILED: i64 = 1001;
    pub const CODE_USER_DISABLED: i64 = 1002;
}

/// Permission codes guarding the console's pages and actions
pub mod permission {
    pub const PERM_SUPERUSER: &str = "*";

    pub const PERM_USER_LIST: &str = "system:user:list";
    pub const PERM_USER_QUERY: &str = "system:user:query";
    pub const PERM_USER_CREATE: &str = "system:user:create";
    pub const PERM_USER_UPDATE: &str = "system:user:update";
    pub const PERM_USER_DELETE: &str = "system:user:delete";
    pub const PERM_USER_RESET_PASSWORD: &str = "system:user:resetPwd";

    pub const PERM_ROLE_LIST: &str = "system:role:list";
    pub const PERM_ROLE_CREATE: &str = "system:role:create";
    pub const PERM_ROLE_UPDATE: &str = "system:role:update";
    pub const PERM_ROLE_DELETE: &str = "system:role:delete";

    pub const PERM_MENU_LIST: &str = "system:menu:list";
    pub const PERM_MENU_CREATE: &str = "system:menu:create";
    pub const PERM_MENU_UPDATE: &str = "system:menu:update";
    pub const PERM_MENU_DELETE: &str = "system:menu:delete";

    pub const PERM_DICT_LIST: &str = "system:dict:list";
    pub const PERM_DICT_CREATE: &str = "system:dict:create";
    pub const PERM_DICT_UPDATE: &str = "system:dict:update";
    pub const PERM_DICT_DELETE: &str = "system:dict:delete";

    pub const PERM_LOG_LIST: &str = "system:log:list";
    pub const PERM_LOG_DELETE: &str = "system:log:delete";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_API_PREFIX: &str = "/api";

    pub const PATH_HEALTH_CHECK: PathSpec = PathSpec::get("/health_check");
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/auth/login");
    pub const PATH_API_LOGOUT: PathSpec = PathSpec::post("/api/auth/logout");
    pub const PATH_API_USER_INFO: PathSpec = PathSpec::get("/api/auth/info");

    pub const PATH_API_USERS_LIST: PathSpec = PathSpec::get("/api/system/users");
    pub const PATH_API_USERS_CREATE: PathSpec = PathSpec::post("/api/system/users");
    pub const PATH_API_USER: PathSpec = PathSpec::get("/api/system/users/{id}");
    pub const PATH_API_USER_UPDATE: PathSpec = PathSpec::put("/api/system/users/{id}");
    pub const PATH_API_USER_DELETE: PathSpec = PathSpec::delete("/api/system/users/{id}");
    pub const PATH_API_USER_PASSWORD: PathSpec = PathSpec::put("/api/system/users/{id}/password");
    pub const PATH_API_USER_STATUS: PathSpec = PathSpec::put("/api/system/users/{id}/status");

    pub const PATH_API_ROLES_LIST: PathSpec = PathSpec::get("/api/system/roles");
    pub const PATH_API_ROLES_CREATE: PathSpec = PathSpec::post("/api/system/roles");
    pub const PATH_API_ROLE_UPDATE: PathSpec = PathSpec::put("/api/system/roles/{id}");
    pub const PATH_API_ROLE_DELETE: PathSpec = PathSpec::delete("/api/system/roles/{id}");
    pub const PATH_API_ROLE_PERMISSIONS: PathSpec =
        PathSpec::put("/api/system/roles/{id}/permissions");

    pub const PATH_API_MENUS_TREE: PathSpec = PathSpec::get("/api/system/menus/tree");
    pub const PATH_API_MENUS_CREATE: PathSpec = PathSpec::post("/api/system/menus");
    pub const PATH_API_MENU_UPDATE: PathSpec = PathSpec::put("/api/system/menus/{id}");
    pub const PATH_API_MENU_DELETE: PathSpec = PathSpec::delete("/api/system/menus/{id}");

    pub const PATH_API_DICTS_LIST: PathSpec = PathSpec::get("/api/system/dicts");
    pub const PATH_API_DICT_ITEMS: PathSpec = PathSpec::get("/api/system/dicts/{id}/items");
    pub const PATH_API_DICT_ITEMS_CREATE: PathSpec = PathSpec::post("/api/system/dicts/items");
    pub const PATH_API_DICT_ITEM_UPDATE: PathSpec = PathSpec::put("/api/system/dicts/items/{id}");
    pub const PATH_API_DICT_ITEM_DELETE: PathSpec =
        PathSpec::delete("/api/system/dicts/items/{id}");

    pub const PATH_API_LOGS_LIST: PathSpec = PathSpec::get("/api/system/logs");
    pub const PATH_API_LOGS_CLEAR: PathSpec = PathSpec::delete("/api/system/logs");
    pub const PATH_API_LOG_DELETE: PathSpec = PathSpec::delete("/api/system/logs/{id}");
}

#[cfg(test)]
mod tests {
    use super::path::*;

    #[test]
    fn api_paths_are_under_api_prefix() {
        for spec in [
            PATH_API_LOGOUT,
            PATH_API_USER_INFO,
            PATH_API_USERS_LIST,
            PATH_API_USER_STATUS,
            PATH_API_ROLE_PERMISSIONS,
            PATH_API_MENUS_TREE,
            PATH_API_DICT_ITEMS,
            PATH_API_LOG_DELETE,
        ] {
            assert!(
                spec.path.starts_with(PATH_API_PREFIX),
                "{spec:?} is not under {PATH_API_PREFIX}"
            );
        }
    }
}
