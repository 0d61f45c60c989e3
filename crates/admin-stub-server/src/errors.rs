use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use admin_shared::{
    const_config::envelope_code::{
        CODE_BAD_REQUEST, CODE_FORBIDDEN, CODE_LOGIN_FAILED, CODE_NOT_FOUND, CODE_USER_DISABLED,
    },
    envelope::Envelope,
    uac::{AuthError, PermissionsError},
};

use crate::store::StoreError;

/// Marks a response as a failed operation for the operation log
#[derive(Debug, Clone, Copy)]
pub struct FailedOperation;

/// Errors returned by handlers. Everything except unexpected errors is
/// reported inside a 200 response through the envelope's `code`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Permissions(#[from] PermissionsError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("unexpected server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> i64 {
        match self {
            ApiError::Auth(AuthError::InvalidUserOrPassword) => CODE_LOGIN_FAILED,
            ApiError::Auth(AuthError::NotEnabled) => CODE_USER_DISABLED,
            ApiError::Permissions(_) => CODE_FORBIDDEN,
            ApiError::Store(StoreError::NotFound { .. }) => CODE_NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) | ApiError::BadRequest(_) => CODE_BAD_REQUEST,
            ApiError::Auth(AuthError::UnexpectedError(_)) | ApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16().into()
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::UnexpectedError(_)) | ApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error.cause_chain = ?self, "request failed unexpectedly");
        }
        let mut response = HttpResponse::build(self.status_code())
            .json(Envelope::<()>::error(self.code(), self.to_string()));
        response.extensions_mut().insert(FailedOperation);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuthError::InvalidUserOrPassword.into(), CODE_LOGIN_FAILED, StatusCode::OK)]
    #[case(AuthError::NotEnabled.into(), CODE_USER_DISABLED, StatusCode::OK)]
    #[case(
        PermissionsError::MissingPermission("system:user:list".into()).into(),
        CODE_FORBIDDEN,
        StatusCode::OK
    )]
    #[case(ApiError::BadRequest("bad".into()), CODE_BAD_REQUEST, StatusCode::OK)]
    #[case(
        anyhow::anyhow!("boom").into(),
        500,
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn envelope_codes(#[case] err: ApiError, #[case] code: i64, #[case] status: StatusCode) {
        assert_eq!(err.code(), code);
        assert_eq!(err.status_code(), status);
    }
}
