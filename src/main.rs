mod config;
mod engine;
mod figure;
mod manager;
mod model;
mod stats;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    map_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate the growth grid and write the heatmap figure.
    Create {
        /// Annotate every cell with its capacity.
        #[arg(long)]
        show_capacity: bool,
    },

    /// Summarize the growth rates of the stored grid.
    Analyze,

    /// Remove generated files.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.map_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Create { show_capacity } => mgr.create_map(show_capacity)?,
        Command::Analyze => mgr.analyze_map()?,
        Command::Clean => mgr.clean_map()?,
    }

    Ok(())
}
