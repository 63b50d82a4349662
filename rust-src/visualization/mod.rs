//! Visualization layer: terminal output, HTML page and images.

mod dashboard;
mod html;
mod image;
mod layout;
mod screen;
mod svg;

pub use dashboard::render_schedule;
pub use html::generate_html;
pub use image::{export_svg, open_file, SvgRenderer};
pub use layout::Layout;
pub use screen::{draw_view, ViewModel};
