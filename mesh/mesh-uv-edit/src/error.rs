//! Error types for UV editing tools.

use std::path::PathBuf;

use mesh_color_id::ColorIdError;
use mesh_loops::LoopError;
use thiserror::Error;

/// Result type for UV editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur while running a UV tool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditError {
    /// The object cannot be used by this tool (wrong type, missing UV layer).
    #[error("{reason}")]
    InvalidTarget {
        /// Human-readable cause.
        reason: &'static str,
    },

    /// The current selection cannot be processed.
    #[error("{reason}")]
    Selection {
        /// Human-readable cause.
        reason: String,
    },

    /// The active face has a corner count the tool cannot handle.
    #[error("active face {face} has {corners} corners; a quad or triangle is required")]
    UnsupportedFace {
        /// Face index.
        face: usize,
        /// Number of corners of the face.
        corners: usize,
    },

    /// A named UV layer does not exist.
    #[error("UV layer '{name}' not found")]
    UvLayerNotFound {
        /// The missing layer name.
        name: String,
    },

    /// Attribute data does not fit the element count of its domain.
    #[error("attribute '{name}' expects {expected} values, got {actual}")]
    AttributeLength {
        /// Attribute name.
        name: String,
        /// Element count of the attribute's domain.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Loop topology is malformed.
    #[error("malformed mesh: {0}")]
    Topology(#[from] LoopError),

    /// The Color-ID engine rejected the bake.
    #[error("Color-ID calculation failed: {0}")]
    Bake(#[from] ColorIdError),

    /// A settings file could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// A settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    /// Create an [`EditError::Selection`] error.
    #[must_use]
    pub fn selection(reason: impl Into<String>) -> Self {
        Self::Selection {
            reason: reason.into(),
        }
    }

    /// Whether the error is the user's input rather than a failure of the
    /// tool itself. Such errors are reported as warnings.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. } | Self::Selection { .. } | Self::UnsupportedFace { .. }
        )
    }
}
