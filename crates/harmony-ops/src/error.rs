//! Error types for harmonization operations.

use thiserror::Error;

/// Error type for harmonization operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Precondition violation reported by harmony-core (bad hue, degenerate
    /// histogram or template, bad region).
    #[error(transparent)]
    Core(#[from] harmony_core::Error),

    /// Buffers that must be index-aligned have different lengths.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    /// Returns the underlying core error, if any.
    pub fn as_core(&self) -> Option<&harmony_core::Error> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for harmonization operations.
pub type OpsResult<T> = Result<T, OpsError>;
