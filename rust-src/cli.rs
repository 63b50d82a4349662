//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::{DEFAULT_DATA_PATH, DEFAULT_HTML_PATH};
use crate::logging;


/// Horario - weekly class schedule viewer with HTML and PNG export
#[derive(Parser)]
#[command(name = "horario")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML schedule page
    Generate {
        /// Schedule data file
        #[arg(short, long, env = "HORARIO_DATA", default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = DEFAULT_HTML_PATH)]
        output: PathBuf,
    },

    /// Export the schedule as a PNG image
    Export {
        /// Schedule data file
        #[arg(short, long, env = "HORARIO_DATA", default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Directory the image is saved to (default: downloads folder)
        #[arg(long, env = "HORARIO_OUT_DIR")]
        out_dir: Option<PathBuf>,

        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Print the PNG as a data URL instead of saving it
        #[arg(long, conflicts_with_all = ["svg", "open"])]
        data_url: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,
    },

    /// Print the schedule table
    Show {
        /// Schedule data file
        #[arg(short, long, env = "HORARIO_DATA", default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
    },

    /// Interactive schedule view with PNG export
    View {
        /// Schedule data file
        #[arg(short, long, env = "HORARIO_DATA", default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Directory exported images are saved to (default: downloads folder)
        #[arg(long, env = "HORARIO_OUT_DIR")]
        out_dir: Option<PathBuf>,
    },
}


/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Generate { data, output }) => commands::generate::run(&data, &output)?,
        Some(Commands::Export { data, out_dir, svg, data_url, open }) => {
            commands::export::run(&data, out_dir, svg, data_url, open).await?
        }
        Some(Commands::Show { data }) => commands::show::run(&data)?,
        Some(Commands::View { data, out_dir }) => commands::view::run(&data, out_dir).await?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_data_url_conflicts_with_svg() {
        let result = Cli::try_parse_from(["horario", "export", "--svg", "--data-url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["horario", "-vv", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
