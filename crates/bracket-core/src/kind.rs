//! Viewer-internal stage kinds.

use serde::{Deserialize, Serialize};

/// Tournament format of a stage, as used by the viewer and the layout cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
}

impl BracketKind {
    /// Stable lowercase name, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleElimination => "single_elimination",
            Self::DoubleElimination => "double_elimination",
            Self::RoundRobin => "round_robin",
            Self::Swiss => "swiss",
        }
    }
}
