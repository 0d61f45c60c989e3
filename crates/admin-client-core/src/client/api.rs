use admin_shared::{
    const_config::path::{PATH_API_LOGOUT, PATH_API_USER_INFO, PATH_HEALTH_CHECK, PATH_LOGIN},
    req_args::LoginReqArgs,
    uac::{LoginResponse, Permissions, RouteNode, UserInfo},
};
use secrecy::ExposeSecret as _;
use tracing::info;

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

pub mod admin;

impl Client {
    /// Stores the returned token and user info in the session on success
    #[tracing::instrument(skip(self))]
    pub async fn login(&self, args: LoginReqArgs) -> Result<LoginResponse, RequestError> {
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
        });
        let response: LoginResponse = self
            .execute(
                PATH_LOGIN.method,
                PATH_LOGIN.path,
                &args,
                &RequestOptions::default(),
            )
            .await?;
        self.session
            .set_login(response.token.clone(), response.user_info.clone());
        info!(username = %response.user_info.username, "logged in");
        Ok(response)
    }

    /// Sends no request if not logged in, only drops cached user info.
    /// Otherwise the session is cleared even if the server could not be told
    /// about it
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), RequestError> {
        if !self.session.is_authenticated() {
            self.session.clear();
            return Ok(());
        }
        let result: Result<(), RequestError> = self
            .execute(
                PATH_API_LOGOUT.method,
                PATH_API_LOGOUT.path,
                &NO_ARGS,
                &RequestOptions::silent(),
            )
            .await;
        self.session.clear();
        match result {
            // Server already forgot the token, nothing left to do
            Err(RequestError::Unauthorized { .. }) => Ok(()),
            other => other,
        }
    }

    /// Fetches the current user's info and replaces the cached copy
    #[tracing::instrument(skip(self))]
    pub async fn get_user_info(&self) -> Result<UserInfo, RequestError> {
        let user_info: UserInfo = self
            .execute(
                PATH_API_USER_INFO.method,
                PATH_API_USER_INFO.path,
                &NO_ARGS,
                &RequestOptions::default(),
            )
            .await?;
        self.session.set_user_info(user_info.clone());
        Ok(user_info)
    }

    #[tracing::instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), RequestError> {
        self.execute(
            PATH_HEALTH_CHECK.method,
            PATH_HEALTH_CHECK.path,
            &NO_ARGS,
            &RequestOptions::silent(),
        )
        .await
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.session.user_info()
    }

    pub fn permissions(&self) -> Permissions {
        self.session.permissions()
    }

    pub fn is_allowed(&self, code: &str, is_route_check: bool) -> bool {
        self.session.is_allowed(code, is_route_check)
    }

    pub fn build_visible_menu_tree(&self, full_route_tree: &[RouteNode]) -> Vec<RouteNode> {
        self.session.build_visible_menu_tree(full_route_tree)
    }
}
