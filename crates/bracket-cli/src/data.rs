//! Stage, config, and standings file loading.

use std::path::Path;

use bracket_convert::{StageStructure, Standings};
use bracket_core::LayoutConfig;

use crate::error::{CliError, Result};

/// Load a stage structure from a JSON file.
pub fn load_stage(path: &Path) -> Result<StageStructure> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| CliError::InvalidDataFile(path.to_path_buf()))?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the layout config, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .map_err(|_| CliError::InvalidDataFile(p.to_path_buf()))?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(LayoutConfig::default()),
    }
}

/// Load an optional standings table keyed by team name.
pub fn load_standings(path: Option<&Path>) -> Result<Option<Standings>> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .map_err(|_| CliError::InvalidDataFile(p.to_path_buf()))?;
            Ok(Some(serde_json::from_str(&content)?))
        }
        None => Ok(None),
    }
}
