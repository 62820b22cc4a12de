//! Error types for trainviz_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors raised while indexing or reshaping caller arrays.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid array shape provided.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Arrays that must be aligned sample-by-sample have different lengths.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Wrong number of dimensions.
    #[error("Dimension error: expected {expected} dimensions, got {got}")]
    DimensionError {
        /// Expected number of dimensions.
        expected: usize,
        /// Actual number of dimensions.
        got: usize,
    },

    /// Index out of bounds along some axis.
    #[error("Index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the axis.
        length: usize,
    },

    /// Nothing to lay out or plot.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}
