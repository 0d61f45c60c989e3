use actix_web::web;
use admin_shared::{
    const_config::permission::{
        PERM_ROLE_CREATE, PERM_ROLE_DELETE, PERM_ROLE_LIST, PERM_ROLE_UPDATE,
    },
    id::DbId,
    req_args::{api::RolePermissionsReqArgs, ListQuery},
    uac::{Role, RoleDraft},
};

use crate::{authentication::SessionUser, store::AdminStore};

use super::{success, table, ApiResult};

#[tracing::instrument(skip(store))]
pub async fn roles_list(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Query(query): web::Query<ListQuery>,
) -> ApiResult<Vec<Role>> {
    user.require(PERM_ROLE_LIST)?;
    table(store.list_roles(&query))
}

#[tracing::instrument(skip(store))]
pub async fn role_create(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Json(draft): web::Json<RoleDraft>,
) -> ApiResult<Role> {
    user.require(PERM_ROLE_CREATE)?;
    success(store.create_role(draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn role_update(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(draft): web::Json<RoleDraft>,
) -> ApiResult<Role> {
    user.require(PERM_ROLE_UPDATE)?;
    success(store.update_role(id.into_inner(), draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn role_delete(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<()> {
    user.require(PERM_ROLE_DELETE)?;
    store.delete_role(id.into_inner())?;
    success(())
}

#[tracing::instrument(skip(store))]
pub async fn role_permissions(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(RolePermissionsReqArgs { permissions }): web::Json<RolePermissionsReqArgs>,
) -> ApiResult<Role> {
    user.require(PERM_ROLE_UPDATE)?;
    success(store.set_role_permissions(id.into_inner(), permissions)?)
}
