//! # Submission Service Errors

use thiserror::Error;

use crate::schema::ValidationErrors;

/// Result type for submission operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors a submission operation reports to its caller
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Values break the form schema
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No submission with this id
    #[error("Submission not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// First user-facing message, as a client banner shows it
    pub fn first_message(&self) -> String {
        match self {
            ServiceError::Validation(errors) => errors
                .first_message()
                .unwrap_or_else(|| "Request failed".to_string()),
            ServiceError::NotFound(_) => "Submission not found".to_string(),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}
