use admin_shared::{
    const_config::path::{
        PATH_API_USER, PATH_API_USERS_CREATE, PATH_API_USERS_LIST, PATH_API_USER_DELETE,
        PATH_API_USER_PASSWORD, PATH_API_USER_STATUS, PATH_API_USER_UPDATE,
    },
    envelope::TableData,
    id::DbId,
    req_args::{api::UserStatusReqArgs, ListQuery},
    uac::{User, UserDraft, UserStatus},
};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

impl Client {
    #[tracing::instrument(skip(self))]
    pub async fn list_users(
        &self,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<TableData<User>, RequestError> {
        self.list(PATH_API_USERS_LIST.path, query, options).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: DbId, options: &RequestOptions) -> Result<User, RequestError> {
        self.execute(
            PATH_API_USER.method,
            &PATH_API_USER.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        user: &UserDraft,
        password: &SecretString,
        options: &RequestOptions,
    ) -> Result<User, RequestError> {
        let mut args = serde_json::to_value(user)
            .map_err(|e| RequestError::Malformed(format!("failed to encode user: {e}")))?;
        args["password"] = password.expose_secret().into();
        self.execute(
            PATH_API_USERS_CREATE.method,
            PATH_API_USERS_CREATE.path,
            &args,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_user(
        &self,
        id: DbId,
        user: &UserDraft,
        options: &RequestOptions,
    ) -> Result<User, RequestError> {
        self.execute(
            PATH_API_USER_UPDATE.method,
            &PATH_API_USER_UPDATE.with_id(id),
            user,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user(
        &self,
        id: DbId,
        options: &RequestOptions,
    ) -> Result<(), RequestError> {
        self.execute(
            PATH_API_USER_DELETE.method,
            &PATH_API_USER_DELETE.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self, new_password))]
    pub async fn reset_password(
        &self,
        id: DbId,
        new_password: &SecretString,
        options: &RequestOptions,
    ) -> Result<(), RequestError> {
        let args = serde_json::json!({
            "newPassword": new_password.expose_secret(),
        });
        self.execute(
            PATH_API_USER_PASSWORD.method,
            &PATH_API_USER_PASSWORD.with_id(id),
            &args,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_user_status(
        &self,
        id: DbId,
        status: UserStatus,
        options: &RequestOptions,
    ) -> Result<User, RequestError> {
        self.execute(
            PATH_API_USER_STATUS.method,
            &PATH_API_USER_STATUS.with_id(id),
            &UserStatusReqArgs { status },
            options,
        )
        .await
    }
}
