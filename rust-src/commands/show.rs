//! Show command - print the weekly table.

use std::path::Path;

use anyhow::Result;

use crate::visualization::render_schedule;

use super::input::load_schedule;


/// Run the show command.
pub fn run(data_path: &Path) -> Result<()> {
    let schedule = load_schedule(data_path)?;
    render_schedule(&schedule);
    Ok(())
}
