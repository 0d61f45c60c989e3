use admin_shared::{
    const_config::path::{
        PATH_API_ROLES_CREATE, PATH_API_ROLES_LIST, PATH_API_ROLE_DELETE,
        PATH_API_ROLE_PERMISSIONS, PATH_API_ROLE_UPDATE,
    },
    envelope::TableData,
    id::DbId,
    req_args::{api::RolePermissionsReqArgs, ListQuery},
    uac::{Permissions, Role, RoleDraft},
};

use crate::{
    client::{RequestOptions, NO_ARGS},
    Client, RequestError,
};

impl Client {
    #[tracing::instrument(skip(self))]
    pub async fn list_roles(
        &self,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<TableData<Role>, RequestError> {
        self.list(PATH_API_ROLES_LIST.path, query, options).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_role(
        &self,
        role: &RoleDraft,
        options: &RequestOptions,
    ) -> Result<Role, RequestError> {
        self.execute(
            PATH_API_ROLES_CREATE.method,
            PATH_API_ROLES_CREATE.path,
            role,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_role(
        &self,
        id: DbId,
        role: &RoleDraft,
        options: &RequestOptions,
    ) -> Result<Role, RequestError> {
        self.execute(
            PATH_API_ROLE_UPDATE.method,
            &PATH_API_ROLE_UPDATE.with_id(id),
            role,
            options,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_role(
        &self,
        id: DbId,
        options: &RequestOptions,
    ) -> Result<(), RequestError> {
        self.execute(
            PATH_API_ROLE_DELETE.method,
            &PATH_API_ROLE_DELETE.with_id(id),
            &NO_ARGS,
            options,
        )
        .await
    }

    /// Replaces the role's permissions with `permissions`
    #[tracing::instrument(skip(self))]
    pub async fn set_role_permissions(
        &self,
        id: DbId,
        permissions: Permissions,
        options: &RequestOptions,
    ) -> Result<Role, RequestError> {
        self.execute(
            PATH_API_ROLE_PERMISSIONS.method,
            &PATH_API_ROLE_PERMISSIONS.with_id(id),
            &RolePermissionsReqArgs { permissions },
            options,
        )
        .await
    }
}
