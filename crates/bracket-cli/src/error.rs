//! CLI error types.

use std::path::PathBuf;

/// CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid data file: {0}")]
    InvalidDataFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stage conversion failed: {0}")]
    Convert(#[from] bracket_convert::ConvertError),
}

pub type Result<T> = std::result::Result<T, CliError>;
