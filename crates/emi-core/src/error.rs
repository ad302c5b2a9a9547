use thiserror::Error;

use crate::validation::ValidationReport;

#[derive(Debug, Error)]
pub enum EmiError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not computable: {reason}")]
    NotComputable { reason: String },

    #[error("Validation failed: {}", .0.messages().join("; "))]
    Validation(ValidationReport),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}
