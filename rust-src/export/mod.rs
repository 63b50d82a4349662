//! Export of the schedule as a PNG image.

mod action;
mod config;
mod download;
mod error;
mod renderer;
mod toast;

#[allow(unused_imports)]
pub use action::{
    initialize,
    ExportAction,
    ExportJob,
    ExportOutcome,
    ExportState,
    StateChange,
    UiState,
    MSG_FAILURE,
    MSG_MISSING_CONTAINER,
    MSG_SUCCESS,
};
#[allow(unused_imports)]
pub use config::{Container, ExportConfig, EXPORT_BACKGROUND, EXPORT_SCALE};
#[allow(unused_imports)]
pub use download::{export_date, export_filename, DirectorySink, Download, DownloadSink, StdoutSink};
pub use error::{ExportError, RenderError};
pub use renderer::{RenderedImage, Renderer};
#[allow(unused_imports)]
pub use toast::{Toast, ToastId, ToastKind, ToastTray};
