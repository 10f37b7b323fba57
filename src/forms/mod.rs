//! Client-side validation run before any mutation request is issued.

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::mutation::MutationBody;

pub mod booking;
pub mod content;
pub mod directory;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid content")]
    InvalidContent,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("date range ends before it starts")]
    InvertedDateRange,

    #[error("could not encode payload: {0}")]
    Encode(String),
}

impl FormError {
    /// Names of the offending fields, for flagging them in the form.
    pub fn fields(&self) -> Vec<String> {
        match self {
            FormError::Validation(errors) => {
                let mut fields: Vec<String> =
                    errors.field_errors().keys().map(|k| k.to_string()).collect();
                fields.sort();
                fields
            }
            FormError::InvalidEmail => vec!["email".to_string()],
            FormError::InvalidPhoneNumber => vec!["phone".to_string()],
            FormError::InvalidName => vec!["name".to_string()],
            FormError::InvalidUrl => vec!["website".to_string()],
            FormError::InvalidDate(field) => vec![field.clone()],
            FormError::InvertedDateRange => vec!["from".to_string(), "to".to_string()],
            FormError::InvalidId | FormError::InvalidContent | FormError::Encode(_) => vec![],
        }
    }
}

/// Serializes a validated payload as a JSON mutation body.
pub fn json_body<T: Serialize>(payload: &T) -> Result<MutationBody, FormError> {
    serde_json::to_value(payload)
        .map(MutationBody::Json)
        .map_err(|e| FormError::Encode(e.to_string()))
}
