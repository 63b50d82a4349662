//! Native renderer: timetable SVG rasterized with resvg.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use resvg::usvg::fontdb;

use crate::export::{Container, ExportConfig, RenderError, RenderedImage, Renderer};

use super::svg::generate_svg;


/// Largest side, in pixels, of an exported image.
const MAX_SIDE: u32 = 16_384;


/// Renders containers through SVG using the fonts in `fontdb`.
#[derive(Clone)]
pub struct SvgRenderer {
    fontdb: Arc<fontdb::Database>,
}


impl SvgRenderer {
    /// Renderer using the fonts installed on the system.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} font faces", db.len());

        Self::with_fontdb(db)
    }

    pub fn with_fontdb(db: fontdb::Database) -> Self {
        Self { fontdb: Arc::new(db) }
    }
}


impl Renderer for SvgRenderer {
    fn check_available(&self) -> Result<(), RenderError> {
        if self.fontdb.len() == 0 {
            return Err(RenderError::Unavailable(
                "no fonts found, text cannot be drawn".to_string(),
            ));
        }
        Ok(())
    }

    fn render(&self, container: &Container, config: &ExportConfig) -> Result<RenderedImage, RenderError> {
        let (width, height) = config.pixel_size();
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(RenderError::InvalidSize { width, height });
        }

        let svg_content = generate_svg(container);

        // Parse SVG
        let mut options = resvg::usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        let tree = resvg::usvg::Tree::from_str(&svg_content, &options)
            .map_err(|e| RenderError::Image(format!("failed to parse SVG: {e}")))?;

        // Render to pixmap
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::InvalidSize { width, height })?;

        let (r, g, b) = hex_to_rgb(&config.background_color);
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));

        let transform = tiny_skia::Transform::from_scale(config.scale, config.scale)
            .pre_translate(-config.scroll_x as f32, -config.scroll_y as f32);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Image(format!("failed to encode PNG: {e}")))?;

        Ok(RenderedImage { width, height, png })
    }
}


/// Write the container's SVG to a file.
pub fn export_svg(container: &Container, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(container);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Convert hex color to RGB tuple. Malformed input yields black.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return (0, 0, 0);
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}
