//! Export command for schedule images.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{get_export_dir, SCHEDULE_TITLE};
use crate::export::{
    export_date, export_filename, initialize, Container, DirectorySink, DownloadSink, StdoutSink,
    ToastTray, UiState,
};
use crate::visualization::{export_svg, open_file, SvgRenderer};

use super::input::load_schedule;


/// Run the export command.
pub async fn run(
    data_path: &Path,
    out_dir: Option<PathBuf>,
    svg: bool,
    data_url: bool,
    should_open: bool,
) -> Result<()> {
    let schedule = load_schedule(data_path)?;
    let container = Container::from_schedule(SCHEDULE_TITLE, &schedule);
    let out_dir = out_dir.unwrap_or_else(get_export_dir);

    if svg {
        let output_path = out_dir.join(export_filename(export_date(), "svg"));
        export_svg(&container, &output_path)?;
        println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

        if should_open {
            println!("Opening SVG...");
            open_file(&output_path)?;
        }
        return Ok(());
    }

    if data_url {
        // stdout carries the data URL only
        export_png(&container, StdoutSink, false, true).await
    } else {
        println!("Exporting to PNG...");
        export_png(&container, DirectorySink::new(out_dir), should_open, false).await
    }
}


/// Run the export action once and report its toasts.
async fn export_png<S: DownloadSink>(
    container: &Container,
    sink: S,
    should_open: bool,
    quiet: bool,
) -> Result<()> {
    let toasts = ToastTray::default();

    let Some(mut action) = initialize(SvgRenderer::with_system_fonts(), sink, toasts.clone()) else {
        anyhow::bail!("PNG export is unavailable: no fonts found. Use --svg instead.");
    };

    let mut ui = UiState::default();
    let result = action
        .export(&mut ui, Some(container), export_date())
        .await;

    for toast in toasts.active() {
        if quiet {
            eprintln!("{}", toast.ansi_line());
        } else {
            println!("{}", toast.ansi_line());
        }
    }

    let outcome = result?;
    log::info!(
        "Exported {} ({}x{})",
        outcome.filename,
        outcome.width,
        outcome.height
    );

    if !quiet {
        println!("\x1b[32m+ Exported to: {}\x1b[0m", outcome.location.display());
    }

    if should_open {
        println!("Opening PNG...");
        open_file(&outcome.location)?;
    }

    Ok(())
}
