use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: &'static str },
}

impl ModelError {
    /// Name of the field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(f) => f,
            Self::InvalidField { field, .. } => field,
        }
    }
}
