//! Configuration and settings for horario.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    get_export_dir,
    DEFAULT_DATA_PATH,
    DEFAULT_HTML_PATH,
    EXPORT_FILE_PREFIX,
    SCHEDULE_TITLE,
    TOAST_DURATION,
    VIEW_TICK,
};
