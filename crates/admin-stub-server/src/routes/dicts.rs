use actix_web::web;
use admin_shared::{
    const_config::permission::{
        PERM_DICT_CREATE, PERM_DICT_DELETE, PERM_DICT_LIST, PERM_DICT_UPDATE,
    },
    id::DbId,
    req_args::ListQuery,
    system::{DictItem, DictItemDraft, DictType},
};

use crate::{authentication::SessionUser, store::AdminStore};

use super::{success, table, ApiResult};

#[tracing::instrument(skip(store))]
pub async fn dict_types_list(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Query(query): web::Query<ListQuery>,
) -> ApiResult<Vec<DictType>> {
    user.require(PERM_DICT_LIST)?;
    table(store.list_dict_types(&query))
}

/// Items feed select boxes all over the console so only a session is needed
#[tracing::instrument(skip(store))]
pub async fn dict_items(
    _user: SessionUser,
    store: web::Data<AdminStore>,
    dict_code: web::Path<String>,
) -> ApiResult<Vec<DictItem>> {
    success(store.list_dict_items(&dict_code)?)
}

#[tracing::instrument(skip(store))]
pub async fn dict_item_create(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Json(draft): web::Json<DictItemDraft>,
) -> ApiResult<DictItem> {
    user.require(PERM_DICT_CREATE)?;
    success(store.create_dict_item(draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn dict_item_update(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(draft): web::Json<DictItemDraft>,
) -> ApiResult<DictItem> {
    user.require(PERM_DICT_UPDATE)?;
    success(store.update_dict_item(id.into_inner(), draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn dict_item_delete(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<()> {
    user.require(PERM_DICT_DELETE)?;
    store.delete_dict_item(id.into_inner())?;
    success(())
}
