//! Horario CLI
//!
//! Weekly class schedule viewer with HTML and PNG export.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod export;
mod logging;
mod models;
mod visualization;


#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
