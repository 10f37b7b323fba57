//! Error conversion glue between layers.
//!
//! The domain and form layers are built with only the `data` feature and must
//! not know about service errors, so the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::remote::errors::RemoteError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val)
    }
}

impl From<RemoteError> for ServiceError {
    fn from(val: RemoteError) -> Self {
        ServiceError::Remote(val)
    }
}
