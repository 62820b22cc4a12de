//! Error types for trainviz_plot.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;
use trainviz_core::CoreError;

/// Result type alias using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while building or rendering a figure.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Malformed input arrays.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// The drawing backend failed (bad path, unsupported extension, font lookup).
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn render_err<E>(err: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Render(err.to_string())
}
