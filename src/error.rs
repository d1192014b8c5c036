//! Error types for grid clustering.

use std::fmt;

/// Errors reported by the clustering entry points.
///
/// Every variant is a parameter-validation failure; validation runs before
/// anything is allocated, so a failed call has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbscanError {
    /// `eps` must be positive; a zero radius makes cell assignment meaningless.
    ZeroEps,

    /// `min_samples` must be at least 1.
    ZeroMinSamples,

    /// A coordinate stride of zero was supplied alongside a positive count.
    ZeroStride {
        /// Which axis ("x" or "y") carried the bad stride.
        axis: &'static str,
    },

    /// A coordinate buffer cannot cover `count` points at its stride.
    BufferTooShort {
        /// Which axis ("x" or "y") the buffer belongs to.
        axis: &'static str,
        /// Minimum element count the stride requires.
        required: usize,
        /// Element count actually supplied.
        len: usize,
    },
}

impl fmt::Display for DbscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbscanError::ZeroEps => write!(f, "eps must be positive"),
            DbscanError::ZeroMinSamples => write!(f, "min_samples must be at least 1"),
            DbscanError::ZeroStride { axis } => {
                write!(f, "{} stride must be nonzero when points are supplied", axis)
            }
            DbscanError::BufferTooShort {
                axis,
                required,
                len,
            } => {
                write!(
                    f,
                    "{} buffer too short: need at least {} elements, got {}",
                    axis, required, len
                )
            }
        }
    }
}

impl std::error::Error for DbscanError {}
