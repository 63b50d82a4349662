//! SVG generation for the weekly timetable.

use crate::export::Container;
use crate::models::{Day, Modality, Subject};

use super::html::escape_markup;
use super::layout::{
    Layout, DAY_COLUMN_WIDTH, HEADER_HEIGHT, PADDING, ROW_HEIGHT, SUMMARY_HEIGHT,
    TIME_COLUMN_WIDTH,
};


// Schedule color scheme
const HEADER_BG: &str = "#2B3A55";
const HEADER_TEXT: &str = "#FFFFFF";
const TEXT: &str = "#1F2933";
const TEXT_SECONDARY: &str = "#52606D";
const GRID: &str = "#C5D3E3";
const CELL_EMPTY: &str = "#FFFFFF";

const FONT: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
const MAX_NAME_CHARS: usize = 22;


/// Fill and accent colors for a modality.
pub fn modality_colors(modality: Modality) -> (&'static str, &'static str) {
    match modality {
        Modality::Presencial => ("#E3F4E4", "#2E7D32"),
        Modality::Virtual => ("#E1EEFB", "#1565C0"),
        Modality::Mixta => ("#FFF1DE", "#E65100"),
    }
}


/// Generate SVG content for the container.
pub fn generate_svg(container: &Container) -> String {
    let layout = Layout::for_rows(container.rows.len());

    let mut svg_parts = vec![
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
            w = layout.width,
            h = layout.height
        ),
        format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="22" font-weight="bold" fill="{}">{}</text>"#,
            PADDING,
            PADDING + 30,
            FONT,
            TEXT,
            escape_markup(&container.title)
        ),
    ];

    svg_parts.push(header_svg(&layout));

    if container.rows.is_empty() {
        svg_parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
            PADDING,
            layout.row_y(0),
            layout.table_width(),
            ROW_HEIGHT,
            CELL_EMPTY,
            GRID
        ));
        svg_parts.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="14" fill="{}" text-anchor="middle">Sin materias cargadas</text>"#,
            PADDING + layout.table_width() / 2,
            layout.row_y(0) + ROW_HEIGHT / 2 + 5,
            FONT,
            TEXT_SECONDARY
        ));
    }

    for (row_idx, row) in container.rows.iter().enumerate() {
        let y = layout.row_y(row_idx);

        // Time column
        svg_parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
            PADDING, y, TIME_COLUMN_WIDTH, ROW_HEIGHT, CELL_EMPTY, GRID
        ));
        svg_parts.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="13" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
            PADDING + TIME_COLUMN_WIDTH / 2,
            y + ROW_HEIGHT / 2 + 5,
            FONT,
            TEXT,
            row.time_range()
        ));

        for day in Day::ALL {
            svg_parts.push(cell_svg(&layout, day, y, row.cell(day)));
        }
    }

    svg_parts.push(summary_svg(&layout, container));
    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


fn header_svg(layout: &Layout) -> String {
    let y = layout.header_y();
    let mut parts = vec![format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        PADDING,
        y,
        layout.table_width(),
        HEADER_HEIGHT,
        HEADER_BG
    )];

    let labels = std::iter::once((PADDING, TIME_COLUMN_WIDTH, "Horario"))
        .chain(Day::ALL.iter().map(|day| (layout.day_x(*day), DAY_COLUMN_WIDTH, day.name())));

    for (x, width, label) in labels {
        parts.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="14" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
            x + width / 2,
            y + HEADER_HEIGHT / 2 + 5,
            FONT,
            HEADER_TEXT,
            label
        ));
    }

    parts.join("\n")
}


fn cell_svg(layout: &Layout, day: Day, y: u32, subject: Option<&Subject>) -> String {
    let x = layout.day_x(day);

    let Some(subject) = subject else {
        return format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
            x, y, DAY_COLUMN_WIDTH, ROW_HEIGHT, CELL_EMPTY, GRID
        );
    };

    let (fill, accent) = modality_colors(subject.modality);
    let center = x + DAY_COLUMN_WIDTH / 2;

    [
        format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}"/>"#,
            x, y, DAY_COLUMN_WIDTH, ROW_HEIGHT, fill, GRID
        ),
        format!(
            r#"<rect x="{}" y="{}" width="4" height="{}" fill="{}"/>"#,
            x, y, ROW_HEIGHT, accent
        ),
        format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="13" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
            center,
            y + 28,
            FONT,
            TEXT,
            escape_markup(&truncate(&subject.name, MAX_NAME_CHARS))
        ),
        format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="11" fill="{}" text-anchor="middle">{}</text>"#,
            center,
            y + 46,
            FONT,
            accent,
            subject.modality.label()
        ),
    ]
    .join("\n")
}


fn summary_svg(layout: &Layout, container: &Container) -> String {
    let summary = &container.summary;
    let text = format!(
        "Total de materias: {}   ·   Presencial: {}   ·   Virtual: {}   ·   Mixta: {}",
        summary.total,
        summary.count(Modality::Presencial),
        summary.count(Modality::Virtual),
        summary.count(Modality::Mixta)
    );

    format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="14" fill="{}">{}</text>"#,
        PADDING,
        layout.summary_y() + SUMMARY_HEIGHT / 2 + 5,
        FONT,
        TEXT_SECONDARY,
        text
    )
}


/// Shorten `text` to `max` characters, ending with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
