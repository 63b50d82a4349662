//! Weekly schedule rendering using terminal output.

use crate::aggregation::{summarize, table_rows, WeeklySchedule};
use crate::models::{Day, Modality, Subject};

use super::svg::truncate;


// Constants
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const ORANGE: &str = "\x1b[38;5;208m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const TIME_WIDTH: usize = 13;
const CELL_WIDTH: usize = 18;


/// ANSI color for a modality.
fn modality_color(modality: Modality) -> &'static str {
    match modality {
        Modality::Presencial => GREEN,
        Modality::Virtual => BLUE,
        Modality::Mixta => ORANGE,
    }
}


/// Pad `text` to `width` display characters.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}


/// Build the complete schedule table as printable lines.
pub fn schedule_lines(schedule: &WeeklySchedule) -> Vec<String> {
    let border = format!(
        "├{}┼{}┤",
        "─".repeat(TIME_WIDTH + 2),
        vec!["─".repeat(CELL_WIDTH + 2); Day::ALL.len()].join("┼")
    );

    let mut lines = vec![
        format!(
            "┌{}┬{}┐",
            "─".repeat(TIME_WIDTH + 2),
            vec!["─".repeat(CELL_WIDTH + 2); Day::ALL.len()].join("┬")
        ),
        format!(
            "│ {}{}{} │{}",
            BOLD,
            pad("Horario", TIME_WIDTH),
            RESET,
            Day::ALL
                .iter()
                .map(|day| format!(" {}{}{}{} │", BOLD, CYAN, pad(day.name(), CELL_WIDTH), RESET))
                .collect::<String>()
        ),
        border.clone(),
    ];

    let rows = table_rows(schedule);
    if rows.is_empty() {
        lines.push(format!(
            "│ {}{}{} │",
            DIM,
            pad("Sin materias cargadas", TIME_WIDTH + Day::ALL.len() * (CELL_WIDTH + 3)),
            RESET
        ));
    }

    for (idx, row) in rows.iter().enumerate() {
        if idx > 0 {
            lines.push(border.clone());
        }

        let cells: Vec<Option<&Subject>> = Day::ALL.iter().map(|day| row.cell(*day)).collect();

        // Name line
        lines.push(format!(
            "│ {} │{}",
            pad(&row.time_range(), TIME_WIDTH),
            cells
                .iter()
                .map(|cell| match cell {
                    Some(s) => format!(
                        " {}{}{} │",
                        BOLD,
                        pad(&truncate(&s.name, CELL_WIDTH), CELL_WIDTH),
                        RESET
                    ),
                    None => format!(" {} │", pad("", CELL_WIDTH)),
                })
                .collect::<String>()
        ));

        // Modality line
        lines.push(format!(
            "│ {} │{}",
            pad("", TIME_WIDTH),
            cells
                .iter()
                .map(|cell| match cell {
                    Some(s) => format!(
                        " {}{}{} │",
                        modality_color(s.modality),
                        pad(s.modality.as_str(), CELL_WIDTH),
                        RESET
                    ),
                    None => format!(" {} │", pad("", CELL_WIDTH)),
                })
                .collect::<String>()
        ));
    }

    lines.push(format!(
        "└{}┴{}┘",
        "─".repeat(TIME_WIDTH + 2),
        vec!["─".repeat(CELL_WIDTH + 2); Day::ALL.len()].join("┴")
    ));

    lines
}


/// Summary line with counts per modality.
pub fn summary_line(schedule: &WeeklySchedule) -> String {
    let summary = summarize(schedule);

    format!(
        "{}Total de materias:{} {}   {}Presencial: {}{}   {}Virtual: {}{}   {}Mixta: {}{}",
        BOLD,
        RESET,
        summary.total,
        GREEN,
        summary.presencial,
        RESET,
        BLUE,
        summary.virtual_count,
        RESET,
        ORANGE,
        summary.mixta,
        RESET,
    )
}


/// Print the schedule table and summary.
pub fn render_schedule(schedule: &WeeklySchedule) {
    for line in schedule_lines(schedule) {
        println!("{}", line);
    }
    println!();
    println!("{}", summary_line(schedule));
    println!();
    println!("{}Tip: Export as PNG with {}{}horario export --open{}", DIM, RESET, CYAN, RESET);
}
