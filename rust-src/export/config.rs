//! Export configuration and the container being exported.

use crate::aggregation::{summarize, table_rows, Summary, TableRow, WeeklySchedule};
use crate::visualization::Layout;


/// Background behind the timetable in exported images.
pub const EXPORT_BACKGROUND: &str = "#EBF2FA";

/// Device pixel ratio for exported images.
pub const EXPORT_SCALE: f32 = 2.0;


/// The schedule content handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub title: String,
    pub rows: Vec<TableRow>,
    pub summary: Summary,
    /// First row shown on screen; only the interactive view moves it.
    pub scroll_top: usize,
}


impl Container {
    /// Build a container from an organized schedule.
    pub fn from_schedule(title: impl Into<String>, schedule: &WeeklySchedule) -> Self {
        Self {
            title: title.into(),
            rows: table_rows(schedule),
            summary: summarize(schedule),
            scroll_top: 0,
        }
    }

    /// Full content width in layout units, ignoring scroll.
    pub fn scroll_width(&self) -> u32 {
        Layout::for_rows(self.rows.len()).width
    }

    /// Full content height in layout units, ignoring scroll.
    pub fn scroll_height(&self) -> u32 {
        Layout::for_rows(self.rows.len()).height
    }
}


/// Options passed to the renderer for one export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub background_color: String,
    pub scale: f32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    /// Remote images may be loaded with cross-origin requests.
    pub use_cors: bool,
    /// Images that would taint the canvas may be drawn.
    pub allow_taint: bool,
    /// Drop the renderer's copy of the container once drawn.
    pub remove_container: bool,
    /// Applied to the renderer's copy of the container before drawing.
    pub on_clone: Option<fn(&mut Container)>,
    pub width: u32,
    pub height: u32,
}


impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background_color: EXPORT_BACKGROUND.to_string(),
            scale: EXPORT_SCALE,
            scroll_x: 0,
            scroll_y: 0,
            use_cors: true,
            allow_taint: false,
            remove_container: true,
            on_clone: Some(reset_view_state),
            width: 0,
            height: 0,
        }
    }
}


impl ExportConfig {
    /// Static options merged with the container's measured size.
    pub fn for_container(container: &Container) -> Self {
        Self {
            width: container.scroll_width(),
            height: container.scroll_height(),
            ..Self::default()
        }
    }

    /// Output size in pixels after scaling.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.scale).round() as u32,
            (self.height as f32 * self.scale).round() as u32,
        )
    }

    /// Copy the container for rendering, running `on_clone` on the copy.
    pub fn clone_container(&self, container: &Container) -> Container {
        let mut cloned = container.clone();
        if let Some(on_clone) = self.on_clone {
            on_clone(&mut cloned);
        }
        cloned
    }
}


/// Drop on-screen view state so the image shows the whole schedule.
fn reset_view_state(container: &mut Container) {
    container.scroll_top = 0;
}
