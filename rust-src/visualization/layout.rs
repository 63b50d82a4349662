//! Fixed timetable geometry shared by the SVG renderer and the container.

use crate::models::Day;


pub const PADDING: u32 = 24;
pub const TITLE_HEIGHT: u32 = 48;
pub const HEADER_HEIGHT: u32 = 40;
pub const ROW_HEIGHT: u32 = 64;
pub const TIME_COLUMN_WIDTH: u32 = 120;
pub const DAY_COLUMN_WIDTH: u32 = 180;
pub const SUMMARY_HEIGHT: u32 = 56;


/// Timetable geometry for a given number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub width: u32,
    pub height: u32,
}


impl Layout {
    pub fn for_rows(rows: usize) -> Self {
        // An empty schedule still gets one placeholder row
        let drawn_rows = rows.max(1) as u32;

        let width = 2 * PADDING + TIME_COLUMN_WIDTH + Day::ALL.len() as u32 * DAY_COLUMN_WIDTH;
        let height = 2 * PADDING + TITLE_HEIGHT + HEADER_HEIGHT + drawn_rows * ROW_HEIGHT + SUMMARY_HEIGHT;

        Self { rows, width, height }
    }

    /// Top edge of the day header row.
    pub fn header_y(&self) -> u32 {
        PADDING + TITLE_HEIGHT
    }

    /// Top edge of the given table row.
    pub fn row_y(&self, row: usize) -> u32 {
        self.header_y() + HEADER_HEIGHT + row as u32 * ROW_HEIGHT
    }

    /// Left edge of a day column.
    pub fn day_x(&self, day: Day) -> u32 {
        PADDING + TIME_COLUMN_WIDTH + day.index() as u32 * DAY_COLUMN_WIDTH
    }

    /// Width of the whole table.
    pub fn table_width(&self) -> u32 {
        self.width - 2 * PADDING
    }

    /// Top edge of the summary block.
    pub fn summary_y(&self) -> u32 {
        self.row_y(self.rows.max(1))
    }
}
