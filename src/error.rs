use thiserror::Error;

/// Error types for the fitmin-rs library.
#[derive(Error, Debug)]
pub enum FitMinError {
    /// Error indicating a mismatch between vector or matrix sizes.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A packed length that is not n(n+1)/2 for any n.
    #[error("Invalid packed length {0}: not a triangular number")]
    InvalidPackedLength(usize),

    /// An operation needs a covariance matrix that has not been established.
    #[error("No covariance available: {0}")]
    NoCovariance(String),

    /// A covariance supplied where it must be usable is not positive definite.
    #[error("Covariance is not positive definite: {0}")]
    NotPositiveDefinite(String),

    /// Invalid input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed number format specifier.
    #[error("Format error: {0}")]
    Format(String),

    /// Malformed text input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Fit parameter error.
    #[error("Parameter error: {0}")]
    Parameter(#[from] crate::parameters::ParameterError),

    /// Binning error.
    #[error("Binning error: {0}")]
    Binning(#[from] crate::binning::BinningError),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] crate::interpolate::InterpolationError),

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

/// Result type alias for fitmin-rs operations.
pub type Result<T> = std::result::Result<T, FitMinError>;

impl From<String> for FitMinError {
    fn from(s: String) -> Self {
        FitMinError::Other(s)
    }
}

impl From<&str> for FitMinError {
    fn from(s: &str) -> Self {
        FitMinError::Other(s.to_string())
    }
}
