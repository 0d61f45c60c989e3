use actix_web::web;
use admin_shared::{
    const_config::permission::{PERM_MENU_CREATE, PERM_MENU_DELETE, PERM_MENU_UPDATE},
    id::DbId,
    system::{Menu, MenuDraft},
};

use crate::{authentication::SessionUser, store::AdminStore};

use super::{success, ApiResult};

/// Any logged in user may read the tree, the console filters it for display
#[tracing::instrument(skip(store))]
pub async fn menu_tree(_user: SessionUser, store: web::Data<AdminStore>) -> ApiResult<Vec<Menu>> {
    success(store.menu_tree())
}

#[tracing::instrument(skip(store))]
pub async fn menu_create(
    user: SessionUser,
    store: web::Data<AdminStore>,
    web::Json(draft): web::Json<MenuDraft>,
) -> ApiResult<Menu> {
    user.require(PERM_MENU_CREATE)?;
    success(store.create_menu(draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn menu_update(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
    web::Json(draft): web::Json<MenuDraft>,
) -> ApiResult<Menu> {
    user.require(PERM_MENU_UPDATE)?;
    success(store.update_menu(id.into_inner(), draft)?)
}

#[tracing::instrument(skip(store))]
pub async fn menu_delete(
    user: SessionUser,
    store: web::Data<AdminStore>,
    id: web::Path<DbId>,
) -> ApiResult<()> {
    user.require(PERM_MENU_DELETE)?;
    store.delete_menu(id.into_inner())?;
    success(())
}
