//! Tournament bracket layout CLI.

mod cli;
mod commands;
mod data;
mod error;
mod output;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> error::Result<()> {
    let cli = Cli::parse();

    let config = data::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Layout(args) => commands::run_layout(args, &config, cli.format),
        Commands::Convert(args) => commands::run_convert(args, cli.format),
        Commands::Summary(args) => commands::run_summary(args, cli.format),
    }
}
