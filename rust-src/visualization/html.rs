//! HTML page generation for the weekly schedule.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{summarize, table_rows, WeeklySchedule};
use crate::config::SCHEDULE_TITLE;
use crate::models::{Day, Modality};

use super::svg::modality_colors;


/// Browser-side PNG export, written next to the page.
const EXPORT_SCRIPT: &str = include_str!("assets/export.js");
const EXPORT_SCRIPT_NAME: &str = "export.js";
const HTML2CANVAS_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/html2canvas/1.4.1/html2canvas.min.js";


/// Escape text for HTML and SVG content.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}


/// Write the schedule page to `output_path`, creating parent directories.
///
/// The export script is written alongside as `export.js`.
pub fn generate_html(schedule: &WeeklySchedule, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(output_path, render_html(schedule))
        .with_context(|| format!("Failed to write HTML to {}", output_path.display()))?;

    let script_path = output_path.with_file_name(EXPORT_SCRIPT_NAME);
    std::fs::write(&script_path, EXPORT_SCRIPT)
        .with_context(|| format!("Failed to write {}", script_path.display()))?;

    Ok(())
}


/// Build the full HTML document.
pub fn render_html(schedule: &WeeklySchedule) -> String {
    let mut parts = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"es\">".to_string(),
        "<head>".to_string(),
        "  <meta charset=\"UTF-8\">".to_string(),
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
        format!("  <title>{}</title>", SCHEDULE_TITLE),
        format!("  <style>{}</style>", stylesheet()),
        "</head>".to_string(),
        "<body>".to_string(),
        "  <div id=\"schedule-container\">".to_string(),
        "    <div class=\"actions\">".to_string(),
        "      <button id=\"export-btn\" type=\"button\">Descargar PNG</button>".to_string(),
        "      <div id=\"loading\" style=\"display: none;\">Generando imagen...</div>".to_string(),
        "    </div>".to_string(),
        "    <div id=\"schedule-only\">".to_string(),
        format!("      <h1>{}</h1>", SCHEDULE_TITLE),
        "      <table class=\"schedule\">".to_string(),
        "        <thead>".to_string(),
        "          <tr>".to_string(),
        "            <th>Horario</th>".to_string(),
    ];

    for day in Day::ALL {
        parts.push(format!("            <th>{}</th>", day.name()));
    }
    parts.push("          </tr>".to_string());
    parts.push("        </thead>".to_string());
    parts.push("        <tbody>".to_string());

    let rows = table_rows(schedule);
    if rows.is_empty() {
        parts.push(format!(
            "          <tr><td class=\"empty\" colspan=\"{}\">Sin materias cargadas</td></tr>",
            Day::ALL.len() + 1
        ));
    }

    for row in &rows {
        parts.push("          <tr>".to_string());
        parts.push(format!("            <td class=\"time\">{}</td>", row.time_range()));

        for day in Day::ALL {
            match row.cell(day) {
                Some(subject) => parts.push(format!(
                    "            <td class=\"subject {modality}\"><span class=\"name\">{name}</span><span class=\"schedule-info\">{hours}</span><span class=\"modality\">{modality}</span></td>",
                    modality = subject.modality.as_str(),
                    name = escape_markup(&subject.name),
                    hours = subject.hours.label(),
                )),
                None => parts.push("            <td></td>".to_string()),
            }
        }

        parts.push("          </tr>".to_string());
    }

    parts.push("        </tbody>".to_string());
    parts.push("      </table>".to_string());

    let summary = summarize(schedule);
    parts.push("      <div class=\"summary\">".to_string());
    parts.push(format!(
        "        <p><strong>Total de materias:</strong> {}</p>",
        summary.total
    ));
    for modality in [Modality::Presencial, Modality::Virtual, Modality::Mixta] {
        parts.push(format!(
            "        <p class=\"{}\">{}: {}</p>",
            modality.as_str(),
            modality.label(),
            summary.count(modality)
        ));
    }
    parts.push("      </div>".to_string());

    parts.push("    </div>".to_string());
    parts.push("  </div>".to_string());
    parts.push(format!("  <script src=\"{}\"></script>", HTML2CANVAS_URL));
    parts.push(format!("  <script src=\"{}\"></script>", EXPORT_SCRIPT_NAME));
    parts.push("</body>".to_string());
    parts.push("</html>".to_string());

    parts.join("\n")
}


fn stylesheet() -> String {
    let mut css = vec![
        "body { font-family: Arial, Helvetica, sans-serif; background: #EBF2FA; color: #1F2933; }".to_string(),
        "#schedule-container { max-width: 1100px; margin: 24px auto; }".to_string(),
        "table.schedule { border-collapse: collapse; width: 100%; background: #FFFFFF; }".to_string(),
        "table.schedule th { background: #2B3A55; color: #FFFFFF; padding: 10px; }".to_string(),
        "table.schedule td { border: 1px solid #C5D3E3; padding: 8px; text-align: center; height: 48px; }".to_string(),
        "td.time { font-weight: bold; white-space: nowrap; }".to_string(),
        "td.subject span { display: block; }".to_string(),
        "td.subject .name { font-weight: bold; }".to_string(),
        "td.subject .schedule-info, td.subject .modality { font-size: 0.8em; }".to_string(),
        ".summary { margin-top: 16px; color: #52606D; }".to_string(),
        ".actions { margin-bottom: 12px; text-align: right; }".to_string(),
        "#export-btn { display: inline-flex; padding: 8px 16px; border: none; border-radius: 4px; background: #2B3A55; color: #FFFFFF; cursor: pointer; }".to_string(),
        ".success-message, .error-message { position: fixed; top: 16px; right: 16px; padding: 12px 16px; border-radius: 4px; color: #FFFFFF; }".to_string(),
        ".success-message { background: #2E7D32; } .error-message { background: #C62828; }".to_string(),
    ];

    for modality in [Modality::Presencial, Modality::Virtual, Modality::Mixta] {
        let (fill, accent) = modality_colors(modality);
        css.push(format!(
            "td.{m} {{ background: {fill}; border-left: 4px solid {accent}; }} .{m} .modality {{ color: {accent}; }}",
            m = modality.as_str(),
        ));
    }

    css.join(" ")
}
