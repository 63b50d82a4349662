//! Full-screen schedule view drawn with ratatui.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::export::{Container, Toast, ToastKind, UiState, MSG_MISSING_CONTAINER};
use crate::models::{Day, Modality};

use super::svg::truncate;


const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TOAST_WIDTH: u16 = 52;


/// Everything the view needs for one frame.
pub struct ViewModel<'a> {
    /// None when the schedule could not be loaded.
    pub container: Option<&'a Container>,
    pub ui: UiState,
    /// False when no renderer could be initialized.
    pub export_bound: bool,
    pub toasts: &'a [Toast],
    pub tick: usize,
}


fn modality_color(modality: Modality) -> Color {
    match modality {
        Modality::Presencial => Color::Green,
        Modality::Virtual => Color::Blue,
        Modality::Mixta => Color::Rgb(230, 81, 0),
    }
}


/// Draw one frame of the schedule view.
pub fn draw_view(frame: &mut Frame, model: &ViewModel) {
    let [table_area, summary_area, footer_area] = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    match model.container {
        Some(container) => {
            frame.render_widget(schedule_table(container), table_area);
            frame.render_widget(summary_line(container), summary_area);
        }
        None => frame.render_widget(
            Paragraph::new(MSG_MISSING_CONTAINER)
                .style(Style::default().fg(Color::Red))
                .block(Block::bordered()),
            table_area,
        ),
    }
    frame.render_widget(footer(model), footer_area);

    draw_toasts(frame, model.toasts);
}


fn schedule_table(container: &Container) -> Table<'static> {
    let header = Row::new(
        std::iter::once(Cell::from("Horario")).chain(Day::ALL.iter().map(|day| Cell::from(day.name()))),
    )
    .style(Style::default().fg(Color::White).bg(Color::Rgb(43, 58, 85)).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = if container.rows.is_empty() {
        vec![Row::new(vec![Cell::from(""), Cell::from("Sin materias cargadas")])]
    } else {
        container
            .rows
            .iter()
            .skip(container.scroll_top)
            .map(|row| {
                let mut cells = vec![Cell::from(row.time_range()).style(Style::default().add_modifier(Modifier::BOLD))];
                for day in Day::ALL {
                    cells.push(match row.cell(day) {
                        Some(subject) => Cell::from(Text::from(vec![
                            Line::from(truncate(&subject.name, 18)),
                            Line::styled(
                                subject.modality.as_str(),
                                Style::default().fg(modality_color(subject.modality)),
                            ),
                        ])),
                        None => Cell::from(""),
                    });
                }
                Row::new(cells).height(2)
            })
            .collect()
    };

    let widths = std::iter::once(Constraint::Length(14))
        .chain(Day::ALL.iter().map(|_| Constraint::Fill(1)));

    Table::new(rows, widths)
        .header(header)
        .block(Block::bordered().title(format!(" {} ", container.title)))
}


fn summary_line(container: &Container) -> Paragraph<'static> {
    let summary = container.summary;
    let mut spans = vec![
        Span::styled("Total de materias: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(summary.total.to_string()),
    ];

    for modality in [Modality::Presencial, Modality::Virtual, Modality::Mixta] {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{}: {}", modality.label(), summary.count(modality)),
            Style::default().fg(modality_color(modality)),
        ));
    }

    Paragraph::new(Line::from(spans))
}


fn footer(model: &ViewModel) -> Paragraph<'static> {
    let mut spans = Vec::new();

    if model.ui.loading_visible {
        spans.push(Span::styled(
            format!("{} Generando imagen...", SPINNER[model.tick % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ));
    }

    if model.ui.trigger_visible && model.export_bound {
        spans.push(Span::styled(
            "[e] Exportar PNG",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled("   [↑/↓] Desplazar   [r] Recargar   [q] Salir", Style::default().add_modifier(Modifier::DIM)));

    Paragraph::new(Line::from(spans))
}


fn draw_toasts(frame: &mut Frame, toasts: &[Toast]) {
    let area = frame.area();

    for (idx, toast) in toasts.iter().enumerate() {
        let width = TOAST_WIDTH.min(area.width);
        let y = area.y + 1 + idx as u16 * 3;
        if y + 3 > area.bottom() {
            break;
        }

        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        };

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.line())
                .style(Style::default().fg(color))
                .block(Block::bordered().border_style(Style::default().fg(color))),
            rect,
        );
    }
}
