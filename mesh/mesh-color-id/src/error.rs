//! Error types for Color-ID baking.

use mesh_loops::LoopError;
use thiserror::Error;

/// Result type for Color-ID operations.
pub type ColorIdResult<T> = Result<T, ColorIdError>;

/// Errors that abort a bake.
///
/// A bake either returns its complete output or one of these; there is no
/// partial result.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ColorIdError {
    /// The input arrays violate the loop-array contract.
    #[error("malformed mesh input: {0}")]
    Topology(#[from] LoopError),

    /// A parameter is outside its valid range.
    #[error("invalid bake parameter {name}: {reason}")]
    InvalidParams {
        /// Name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A size computation overflowed.
    #[error("arithmetic overflow while computing {what}")]
    Overflow {
        /// What was being computed.
        what: &'static str,
    },

    /// An internal table disagrees with the mesh it was built from.
    #[error("internal inconsistency: {details}")]
    Inconsistent {
        /// Description of the mismatch.
        details: String,
    },
}

impl ColorIdError {
    /// Create an [`ColorIdError::InvalidParams`] error.
    #[must_use]
    pub fn invalid_param(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            name,
            reason: reason.into(),
        }
    }

    /// Create an [`ColorIdError::Inconsistent`] error.
    #[must_use]
    pub fn inconsistent(details: impl Into<String>) -> Self {
        Self::Inconsistent {
            details: details.into(),
        }
    }
}
