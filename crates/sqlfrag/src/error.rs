//! Error types for sqlfrag

use thiserror::Error;

/// Result type alias for sqlfrag operations
pub type FragResult<T> = Result<T, FragError>;

/// Errors raised by the fallible helpers around the fragment model.
///
/// Building, appending and rendering fragments never fail; these variants come
/// from identifier validation, parameter limits, row decoding and config loading.
#[derive(Debug, Error)]
pub enum FragError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Row decode error
    #[error("Decode error on column {column}: {message}")]
    Decode { column: usize, message: String },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl FragError {
    /// Create a decode error for a column index
    pub fn decode(column: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            column,
            message: message.into(),
        }
    }

    /// Attach the column index to a decode error; other variants pass through.
    pub fn at_column(self, column: usize) -> Self {
        match self {
            Self::Decode { message, .. } => Self::Decode { column, message },
            other => other,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<toml::de::Error> for FragError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
