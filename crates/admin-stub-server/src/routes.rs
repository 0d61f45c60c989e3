mod auth;
mod dicts;
mod health_check;
mod logs;
mod menus;
mod roles;
mod users;

use actix_web::{web, HttpRequest, HttpResponse};
use admin_shared::{const_config::envelope_code::CODE_NOT_FOUND, envelope::Envelope};

use crate::ApiError;

pub use auth::{log_out, login, user_info};
pub use dicts::{
    dict_item_create, dict_item_delete, dict_item_update, dict_items, dict_types_list,
};
pub use health_check::health_check;
pub use logs::{log_delete, logs_clear, logs_list};
pub use menus::{menu_create, menu_delete, menu_tree, menu_update};
pub use roles::{role_create, role_delete, role_permissions, role_update, roles_list};
pub use users::{
    user, user_create, user_delete, user_password_reset, user_status, user_update, users_list,
};

pub type ApiResult<T> = Result<web::Json<Envelope<T>>, ApiError>;

fn success<T>(data: T) -> ApiResult<T> {
    Ok(web::Json(Envelope::success(data)))
}

fn table<T>((rows, total): (Vec<T>, u64)) -> ApiResult<Vec<T>> {
    Ok(web::Json(Envelope::success_with_total(rows, total)))
}

#[tracing::instrument]
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::error!("Failed to match route");
    HttpResponse::NotFound().json(Envelope::<()>::error(
        CODE_NOT_FOUND,
        format!("{} to '{}' Not found", req.method(), req.path()),
    ))
}
