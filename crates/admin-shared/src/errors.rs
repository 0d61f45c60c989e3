/// Reasons a raw value is refused by one of the validated newtypes
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("value must not be empty")]
    Empty,
    #[error("value is {actual} characters long but at most {max} are allowed")]
    MaxExceeded { max: usize, actual: usize },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl ConversionError {
    /// Refuses values longer than `max` bytes
    pub fn check_max_len(value: &str, max: usize) -> Result<(), Self> {
        match value.len() {
            actual if actual > max => Err(Self::MaxExceeded { max, actual }),
            _ => Ok(()),
        }
    }

    /// Like [`Self::check_max_len`] but an empty value is refused too
    pub fn check_required(value: &str, max: usize) -> Result<(), Self> {
        if value.is_empty() {
            return Err(Self::Empty);
        }
        Self::check_max_len(value, max)
    }
}

/// The request did not carry the token of a live session
#[derive(Debug, thiserror::Error)]
#[error("missing or expired session token")]
pub struct NotLoggedInError;

#[cfg(feature = "server_only")]
impl actix_web::ResponseError for NotLoggedInError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }
}
