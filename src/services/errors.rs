use thiserror::Error;

use crate::forms::FieldErrors;

/// Error type returned by the category lifecycle services.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Input fields were missing or invalid.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// The uploaded image could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// Requested category or file was not found.
    #[error("not found")]
    NotFound,
    /// Reading, writing or removing a stored file failed.
    #[error("storage error: {0}")]
    Storage(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
