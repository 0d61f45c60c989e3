use actix_web::web;
use admin_shared::{
    const_config::path::PATH_LOGIN,
    req_args::LoginReqArgs,
    system::OperationOutcome,
    uac::{LoginResponse, UserInfo},
};

use crate::{authentication::SessionUser, store::AdminStore};

use super::{success, ApiResult};

/// Opens a session and hands out a bearer token.
///
/// Wrong credentials and disabled accounts are envelope errors, not 401s, so
/// the console does not mistake them for an expired session
#[tracing::instrument(
    skip(req_args, store),
    fields(username=tracing::field::Empty)
)]
pub async fn login(
    web::Json(req_args): web::Json<LoginReqArgs>,
    store: web::Data<AdminStore>,
) -> ApiResult<LoginResponse> {
    tracing::Span::current().record("username", tracing::field::display(&req_args.username));
    let (token, user_info) = store.login(&req_args.username, &req_args.password)?;
    store.record_operation(
        user_info.username.as_ref(),
        PATH_LOGIN.method.as_str(),
        PATH_LOGIN.path,
        OperationOutcome::Success,
    );
    success(LoginResponse { token, user_info })
}

#[tracing::instrument(skip(store))]
pub async fn log_out(user: SessionUser, store: web::Data<AdminStore>) -> ApiResult<()> {
    store.end_session(&user.token);
    success(())
}

#[tracing::instrument(skip(user))]
pub async fn user_info(user: SessionUser) -> ApiResult<UserInfo> {
    success(user.info)
}
