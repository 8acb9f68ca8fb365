//! Error taxonomy for the alias registry.
//!
//! Validation errors are recoverable: the caller re-prompts the user and
//! retries. [`RegistryError::NotFound`] is recoverable on the lookup path.
//! [`RegistryError::CodeSpaceExhausted`] is the one fatal kind, raised only
//! when code generation cannot find a free code within its retry bound.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The request field a validation error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    OriginalUrl,
    ValidityMinutes,
    CustomCode,
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OriginalUrl => "original_url",
            Self::ValidityMinutes => "validity_minutes",
            Self::CustomCode => "custom_code",
        };
        f.write_str(name)
    }
}

/// A single recoverable validation failure.
///
/// Each kind belongs to exactly one request field; [`ValidationError::field`]
/// returns it so callers can attach the message to the right form input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Original URL is required")]
    RequiredField,

    #[error("Please enter a valid URL")]
    MalformedUrl,

    #[error("Validity must be a positive integer")]
    InvalidValidity,

    #[error("Short code must be 3-20 characters long and contain only letters, numbers, and hyphens")]
    InvalidCodeFormat,

    #[error("This short code is already in use")]
    CodeAlreadyInUse,
}

impl ValidationError {
    /// The request field this error is attributed to.
    pub fn field(&self) -> RequestField {
        match self {
            Self::RequiredField | Self::MalformedUrl => RequestField::OriginalUrl,
            Self::InvalidValidity => RequestField::ValidityMinutes,
            Self::InvalidCodeFormat | Self::CodeAlreadyInUse => RequestField::CustomCode,
        }
    }
}

/// A validation failure tagged with the index of the batch request it
/// belongs to. Single-request creation reports index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestError {
    pub request: usize,
    pub error: ValidationError,
}

impl RequestError {
    pub fn new(request: usize, error: ValidationError) -> Self {
        Self { request, error }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request #{}, {}: {}",
            self.request,
            self.error.field(),
            self.error
        )
    }
}

/// Errors returned by registry operations.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// One or more requests failed validation. Nothing was committed; the
    /// list holds every violation found, tagged by request index.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<RequestError>),

    /// No live record holds this code. Expired records report the same way
    /// on the lookup path.
    #[error("short code not found: {code}")]
    NotFound { code: String },

    /// Code generation could not find a free code within its retry bound.
    #[error("short code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_to_one_field() {
        assert_eq!(ValidationError::RequiredField.field(), RequestField::OriginalUrl);
        assert_eq!(ValidationError::MalformedUrl.field(), RequestField::OriginalUrl);
        assert_eq!(
            ValidationError::InvalidValidity.field(),
            RequestField::ValidityMinutes
        );
        assert_eq!(
            ValidationError::InvalidCodeFormat.field(),
            RequestField::CustomCode
        );
        assert_eq!(
            ValidationError::CodeAlreadyInUse.field(),
            RequestField::CustomCode
        );
    }

    #[test]
    fn test_request_error_display_names_field() {
        let err = RequestError::new(2, ValidationError::CodeAlreadyInUse);
        let text = err.to_string();
        assert!(text.contains("request #2"));
        assert!(text.contains("custom_code"));
        assert!(text.contains("already in use"));
    }
}
