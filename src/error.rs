use thiserror::Error;

use crate::parameters::bounds::BoundsError;

/// Error types for the transit-params library.
#[derive(Error, Debug)]
pub enum TransitError {
    /// A block's size does not match its declared grouping.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Mutation attempted on a frozen parameter set.
    #[error("Frozen parameter set: {0}")]
    FrozenSet(String),

    /// An operation that needs the cached bounds was called on an unfrozen set.
    #[error("Parameter set is not frozen: {0}")]
    NotFrozen(String),

    /// Two parameters share a name.
    #[error("Duplicate parameter name: {0}")]
    DuplicateName(String),

    /// A passband parameter does not follow the `<base>_<passband>` naming.
    #[error("Naming convention violated: {0}")]
    NamingConvention(String),

    /// Passband parameters do not cover every base × passband combination.
    #[error("Incomplete passband coverage: {0}")]
    IncompleteCoverage(String),

    /// Parameter not found.
    #[error("Parameter not found: {0}")]
    NotFound(String),

    /// Error indicating a mismatch in array dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid prior distribution parameters.
    #[error("Invalid prior: {0}")]
    InvalidPrior(String),

    /// Error for invalid parameter definitions.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error for boundary definitions.
    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for transit-params operations.
pub type Result<T> = std::result::Result<T, TransitError>;
