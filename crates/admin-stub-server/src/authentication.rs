//! Bearer token sessions

use std::future::{ready, Ready};

use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    web, FromRequest, HttpMessage, HttpRequest,
};
use admin_shared::{
    errors::NotLoggedInError,
    system::OperationOutcome,
    token::AuthToken,
    uac::{PermissionsError, UserInfo},
};
use tracing::info;

use crate::{errors::FailedOperation, store::AdminStore};

/// The user a request was authenticated as. Available to every handler behind
/// [`validate_user_access`]
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub token: AuthToken,
    pub info: UserInfo,
}

impl SessionUser {
    pub fn require(&self, code: &str) -> Result<(), PermissionsError> {
        if self.info.permissions.is_allowed(code, false) {
            Ok(())
        } else {
            Err(PermissionsError::MissingPermission(code.to_string()))
        }
    }
}

impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionUser>()
                .cloned()
                .ok_or_else(|| NotLoggedInError.into()),
        )
    }
}

/// Ensures the request carries a token of a live session and records every
/// mutating request in the operation log. Unknown tokens get a 401
#[tracing::instrument(skip(next))]
pub async fn validate_user_access(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let Some(store) = req.app_data::<web::Data<AdminStore>>().cloned() else {
        return Err(actix_web::error::ErrorInternalServerError(
            "store not registered",
        ));
    };
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(AuthToken::from_bearer_header);
    let Some((token, info)) = token.and_then(|token| {
        let info = store.session_user(&token)?;
        Some((token, info))
    }) else {
        return Err(NotLoggedInError.into());
    };

    info!("Validated request for {:?}", info.username.as_ref());
    let username = info.username.to_string();
    req.extensions_mut().insert(SessionUser { token, info });

    let method = req.method().clone();
    let path = req.path().to_string();
    let response = next.call(req).await?;
    if method != Method::GET {
        let is_failure = !response.status().is_success()
            || response.response().extensions().get::<FailedOperation>().is_some();
        let outcome = if is_failure {
            OperationOutcome::Failure
        } else {
            OperationOutcome::Success
        };
        store.record_operation(&username, method.as_str(), &path, outcome);
    }
    Ok(response)
}
