use actix_web::web;
use admin_shared::{
    const_config::permission::{
        PERM_USER_CREATE, PERM_USER_DELETE, PERM_USER_LIST, PERM_USER_QUERY,
        PERM_USER_RESET_PASSWORD, PERM_USER_UPDATE,
    },
    id::DbId,
    req_args::{
        api::{NewUserReqArgs, PasswordResetReqArgs, UserStatusReqArgs},
        ListQuery,
    },
    uac::{User, UserDraft},
};

use crate::{authentication::SessionUser, store::AdminStore, ApiError};

use super::{success, table, ApiResult};

#[tracing::instrument(skip(store))]
pub async fn users_list(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Query(query): web::Query<ListQuery>,
) -> ApiResult<Vec<User>> {
    user.require(PERM_USER_LIST)?;
    table(store.list_users(&query))
}

#[tracing::instrument(skip(store))]
pub async fn user(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<User> {
    user.require(PERM_USER_QUERY)?;
    success(store.get_user(id.into_inner())?)
}

#[tracing::instrument(skip(store, req_args))]
pub async fn user_create(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Json(req_args): web::Json<NewUserReqArgs>,
) -> ApiResult<User> {
    user.require(PERM_USER_CREATE)?;
    let NewUserReqArgs { user, password } = req_args;
    success(store.create_user(user, password)?)
}

#[tracing::instrument(skip(store))]
pub async fn user_update(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(draft): web::Json<UserDraft>,
) -> ApiResult<User> {
    user.require(PERM_USER_UPDATE)?;
    success(store.update_user(id.into_inner(), draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn user_delete(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<()> {
    user.require(PERM_USER_DELETE)?;
    let id = id.into_inner();
    if id == user.info.id {
        return Err(ApiError::BadRequest("you cannot delete yourself".into()));
    }
    store.delete_user(id)?;
    success(())
}

#[tracing::instrument(skip(store, req_args))]
pub async fn user_password_reset(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(req_args): web::Json<PasswordResetReqArgs>,
) -> ApiResult<()> {
    user.require(PERM_USER_RESET_PASSWORD)?;
    store.reset_password(id.into_inner(), req_args.new_password)?;
    success(())
}

#[tracing::instrument(skip(store))]
pub async fn user_status(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(UserStatusReqArgs { status }): web::Json<UserStatusReqArgs>,
) -> ApiResult<User> {
    user.require(PERM_USER_UPDATE)?;
    success(store.set_user_status(id.into_inner(), status)?)
}
