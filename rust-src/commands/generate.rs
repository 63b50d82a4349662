//! Generate command - write the schedule as an HTML page.

use std::path::Path;

use anyhow::Result;

use crate::visualization::generate_html;

use super::input::load_schedule;


/// Run the generate command.
pub fn run(data_path: &Path, output_path: &Path) -> Result<()> {
    let schedule = load_schedule(data_path)?;

    if schedule.is_empty() {
        log::warn!("{} has no subjects", data_path.display());
    }

    generate_html(&schedule, output_path)?;

    println!(
        "\x1b[32m✅ Horario HTML generado exitosamente en {}\x1b[0m",
        output_path.display()
    );

    Ok(())
}
