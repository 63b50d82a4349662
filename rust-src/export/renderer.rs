//! Renderer seam: turns a container into a PNG.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::config::{Container, ExportConfig};
use super::error::RenderError;


/// PNG produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}


impl RenderedImage {
    /// Encode as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}


/// Converts a schedule container into a bitmap.
///
/// Rendering is CPU bound and runs on a blocking worker, so implementations
/// must be shareable across threads.
pub trait Renderer: Send + Sync + 'static {
    /// Check if the renderer can produce images at all.
    fn check_available(&self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Render `container` with `config`.
    fn render(&self, container: &Container, config: &ExportConfig) -> Result<RenderedImage, RenderError>;
}
