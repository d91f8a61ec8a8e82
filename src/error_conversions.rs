//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::assets::{AssetError, ThumbnailError};
    use crate::forms::categories::CategoryFormError;
    use crate::services::ServiceError;

    impl From<CategoryFormError> for ServiceError {
        fn from(val: CategoryFormError) -> Self {
            match val {
                CategoryFormError::Validation(errors) => ServiceError::Validation(errors),
            }
        }
    }

    impl From<ThumbnailError> for ServiceError {
        fn from(val: ThumbnailError) -> Self {
            match val {
                ThumbnailError::InvalidImage(message) => ServiceError::InvalidImage(message),
                ThumbnailError::Encode(message) => {
                    log::error!("Failed to encode thumbnail: {message}");
                    ServiceError::Internal
                }
            }
        }
    }

    impl From<AssetError> for ServiceError {
        fn from(val: AssetError) -> Self {
            match val {
                AssetError::NotFound(_) => ServiceError::NotFound,
                other => ServiceError::Storage(other.to_string()),
            }
        }
    }
}
