use actix_web::web;
use admin_shared::{
    const_config::permission::{PERM_LOG_DELETE, PERM_LOG_LIST},
    id::DbId,
    req_args::ListQuery,
    system::OperationLog,
};

use crate::{authentication::SessionUser, store::AdminStore};

use super::{success, table, ApiResult};

#[tracing::instrument(skip(store))]
pub async fn logs_list(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Query(query): web::Query<ListQuery>,
) -> ApiResult<Vec<OperationLog>> {
    user.require(PERM_LOG_LIST)?;
    table(store.list_logs(&query))
}

#[tracing::instrument(skip(store))]
pub async fn log_delete(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<()> {
    user.require(PERM_LOG_DELETE)?;
    store.delete_log(id.into_inner())?;
    success(())
}

#[tracing::instrument(skip(store))]
pub async fn logs_clear(user: SessionUser, store: web::Data<AdminStore>) -> ApiResult<u64> {
    user.require(PERM_LOG_DELETE)?;
    success(store.clear_logs())
}
