//! Error types for the export action.

use thiserror::Error;


/// Failure inside the renderer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer is not available: {0}")]
    Unavailable(String),

    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to build image: {0}")]
    Image(String),

    #[error("render task stopped: {0}")]
    Crashed(String),
}


/// Failure of one export request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("schedule container not found")]
    MissingContainer,

    #[error("an export is already in progress")]
    Busy,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to save image: {0}")]
    Delivery(String),
}
