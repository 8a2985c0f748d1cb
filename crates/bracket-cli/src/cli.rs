//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use bracket_core::BracketAlignment;

#[derive(Parser)]
#[command(name = "bracket")]
#[command(author, version, about = "Tournament bracket layout tool")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (table or json)
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Path to a layout config JSON file (default: built-in geometry)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Default, Copy)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute match positions and connectors for a stage
    Layout(LayoutArgs),

    /// Convert a stage structure into viewer data
    Convert(ConvertArgs),

    /// Show per-group and per-round match counts
    Summary(SummaryArgs),
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// Path to the stage structure JSON file
    pub stage: PathBuf,

    /// Apply a size-detected double-elimination format profile
    #[arg(long)]
    pub profile: bool,

    /// Override the configured bracket alignment
    #[arg(short, long)]
    pub alignment: Option<AlignmentChoice>,

    /// Path to a standings JSON file supplying Swiss records
    #[arg(long)]
    pub standings: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy)]
pub enum AlignmentChoice {
    Top,
    Bottom,
    Center,
    FinalsTop,
}

impl From<AlignmentChoice> for BracketAlignment {
    fn from(choice: AlignmentChoice) -> Self {
        match choice {
            AlignmentChoice::Top => Self::Top,
            AlignmentChoice::Bottom => Self::Bottom,
            AlignmentChoice::Center => Self::Center,
            AlignmentChoice::FinalsTop => Self::FinalsTop,
        }
    }
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the stage structure JSON file
    pub stage: PathBuf,

    /// Path to a standings JSON file supplying Swiss records
    #[arg(long)]
    pub standings: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Path to the stage structure JSON file
    pub stage: PathBuf,
}
