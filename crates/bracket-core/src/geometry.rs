//! Layout output geometry.
//!
//! Everything here is a plain value owned by the caller of the layout
//! functions. The engine produces a fresh [`BracketLayout`] per call and
//! keeps no references into it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::group::BracketGroup;

/// A 2D pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Computed placement of a single match card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPosition {
    /// Horizontal column index
    pub x_round: u32,
    /// Vertical lane index within the match's bracket group
    pub y_lane: usize,
    pub x_px: f64,
    pub y_px: f64,
}

/// Classification of a connector by its endpoints' groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorType {
    /// Both endpoints in the same bracket group
    Internal,
    /// Across groups, not into the grand final
    CrossBracket,
    /// Across groups into the grand final
    GrandFinal,
}

impl ConnectorType {
    /// Derive the connector type from the endpoint groups.
    pub fn classify(from: BracketGroup, to: BracketGroup) -> Self {
        if from == to {
            Self::Internal
        } else if to == BracketGroup::GrandFinal {
            Self::GrandFinal
        } else {
            Self::CrossBracket
        }
    }
}

/// A 4-point Z-polyline from the right edge of a source card to the left
/// edge of a target card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLine {
    pub from_match_id: String,
    pub to_match_id: String,
    pub points: [Point; 4],
    pub connector_type: ConnectorType,
}

/// Column label anchor, one per distinct column in the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundHeader {
    pub x_round: u32,
    pub x_px: f64,
    pub y_px: f64,
}

/// Qualification zone of a Swiss record bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwissZone {
    Neutral,
    Advancing,
    Eliminated,
}

/// Panel geometry for one Swiss record bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwissPanelPosition {
    /// Record key in `"W-L"` form
    pub key: String,
    /// Round the bucket plays in (`W + L + 1`)
    pub round_number: u32,
    pub date: Option<String>,
    pub best_of: Option<u32>,
    pub x_px: f64,
    pub y_px: f64,
    pub width: f64,
    pub height: f64,
    pub match_count: usize,
    pub zone: SwissZone,
}

/// Complete layout output: positioned matches, headers, connectors, and for
/// Swiss stages the record-bucket panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BracketLayout {
    pub match_positions: HashMap<String, MatchPosition>,
    pub header_positions: Vec<RoundHeader>,
    pub connectors: Vec<ConnectorLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_positions: Option<Vec<SwissPanelPosition>>,
    /// Top offset per bracket group, for section titles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_offset_y: Option<BTreeMap<BracketGroup, f64>>,
    pub total_width: f64,
    pub total_height: f64,
}

impl BracketLayout {
    /// The layout of an empty stage: zero totals, empty collections.
    pub fn empty() -> Self {
        Self::default()
    }
}
