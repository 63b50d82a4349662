//! Data access layer for schedule files.

mod schedule_reader;

#[allow(unused_imports)]
pub use schedule_reader::{
    load_subjects,
    parse_subjects,
    read_schedule,
    validate_format,
    FormatError,
};
