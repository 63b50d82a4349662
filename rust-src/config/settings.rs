//! Application settings and path constants.

use std::path::PathBuf;
use std::time::Duration;


/// Default schedule data file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/horarios.json";

/// Default HTML output file.
pub const DEFAULT_HTML_PATH: &str = "output/horario.html";

/// Title shown on the page, the image and the terminal view.
pub const SCHEDULE_TITLE: &str = "Mi Horario Semanal";

/// Prefix for exported images (`horario-YYYY-MM-DD.png`).
pub const EXPORT_FILE_PREFIX: &str = "horario";

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Redraw interval for the interactive view.
pub const VIEW_TICK: Duration = Duration::from_millis(100);


/// Get the directory exported images are saved to.
///
/// Uses the user's download directory, then the home directory, then `.`.
pub fn get_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
