//! # Render Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the drawing boundary and the projection cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The asset loader could not produce an image.
    #[error("failed to load image {path:?}: {reason}")]
    ImageLoad {
        /// Path handed to the loader.
        path: PathBuf,
        /// Loader's explanation.
        reason: String,
    },

    /// The surface rejected a blit.
    #[error("blit failed: {0}")]
    Blit(String),

    /// A screen-cache row that does not exist.
    #[error("projection row {index} out of range (len {len})")]
    ProjectionOutOfRange {
        /// The offending row.
        index: usize,
        /// Cached entity count.
        len: usize,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
