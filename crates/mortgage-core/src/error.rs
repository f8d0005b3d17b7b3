use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid parameter: {field} - {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if this is a parameter error.
    pub fn field(&self) -> Option<&str> {
        match self {
            MortgageError::InvalidParameter { field, .. } => Some(field.as_str()),
            MortgageError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
