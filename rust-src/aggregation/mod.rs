//! Aggregation layer for weekly schedules.

mod weekly;

#[allow(unused_imports)]
pub use weekly::{
    WeeklySchedule,
    TableRow,
    Summary,
    organize,
    table_rows,
    summarize,
};
