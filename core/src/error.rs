use thiserror::Error;

#[derive(Debug, Error)]
pub enum EatFitError {
    /// A profile field or enum tag was rejected before it reached the calculator.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Storage failure: {0}")]
    Persistence(String),
}

impl EatFitError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<rusqlite::Error> for EatFitError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}

impl From<serde_json::Error> for EatFitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}

pub type EatFitResult<T> = Result<T, EatFitError>;
