use thiserror::Error;

/// Top-level error type for the geomorph toolkit.
#[derive(Debug, Error)]
pub enum GeomorphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl GeomorphError {
    /// Returns `true` for every structural violation detected at a call
    /// boundary (too few points, non-finite values, bad targets or options).
    ///
    /// All current variants fall in this class; collapse, split and
    /// degenerate numerics are reported as data, never as errors.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Geometry(GeometryError::TooFewPoints { .. } | GeometryError::NonFinite { .. })
            | Self::Operation(OperationError::InvalidInput(_)) => true,
        }
    }
}

/// Errors related to the shape of input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("at least {required} points required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },
}

/// Errors related to operation parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`GeomorphError`].
pub type Result<T> = std::result::Result<T, GeomorphError>;
