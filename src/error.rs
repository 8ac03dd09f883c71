use thiserror::Error;

/// Error types for the varview-rs library.
#[derive(Error, Debug)]
pub enum VarViewError {
    /// Error for an invalid or incompatible view specification.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Error for an index outside the addressed partition.
    ///
    /// This always indicates a programming error in the caller: translator
    /// indices are never clamped or wrapped.
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// Error for a view contraction that would discard non-zero coefficients.
    #[error("Data loss: {0}")]
    DataLossError(String),

    /// Error for a coefficient remap between two partial views.
    #[error("Unsupported view transition: {0}")]
    UnsupportedViewTransition(String),

    /// Invalid input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for varview-rs operations.
pub type Result<T> = std::result::Result<T, VarViewError>;

/// Extensions for converting from other error types.
impl From<String> for VarViewError {
    fn from(s: String) -> Self {
        VarViewError::Other(s)
    }
}

impl From<&str> for VarViewError {
    fn from(s: &str) -> Self {
        VarViewError::Other(s.to_string())
    }
}
