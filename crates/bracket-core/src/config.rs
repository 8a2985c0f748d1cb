//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::group::BracketGroup;

/// Vertical arrangement of bracket groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BracketAlignment {
    /// Groups stacked from the top offset
    Top,
    /// Groups stacked from the top offset (same stacking as `Top`; the
    /// name reflects renderer anchoring, not engine geometry)
    #[default]
    Bottom,
    /// Each group centered within the tallest group's band
    Center,
    /// Winners and grand final share the top band, losers below
    FinalsTop,
}

impl BracketAlignment {
    /// Group walk order for column and offset assignment.
    pub fn group_order(&self) -> &'static [BracketGroup; 4] {
        match self {
            Self::FinalsTop => &BracketGroup::FINALS_TOP_ORDER,
            _ => &BracketGroup::DISPLAY_ORDER,
        }
    }

    /// Stable kebab-case name, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
            Self::FinalsTop => "finals-top",
        }
    }
}

/// Swiss-specific thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SwissConfig {
    /// Win count at which a record bucket is classified advancing
    pub max_wins: Option<u32>,
    /// Loss count at which a record bucket is classified eliminated
    pub max_losses: Option<u32>,
}

/// Pure geometry inputs to the layout engines.
///
/// The engines read nothing outside this struct (plus the optional format
/// profile passed separately).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between column origins
    pub column_width: f64,
    /// Vertical distance between lane origins
    pub row_height: f64,
    pub match_width: f64,
    pub match_height: f64,
    pub top_offset: f64,
    pub left_offset: f64,
    /// Empty columns inserted between bracket groups
    pub group_gap_x: u32,
    /// Vertical gap between stacked bracket groups
    pub group_gap_y: f64,
    pub bracket_alignment: BracketAlignment,
    /// Column at which the losers bracket starts under `finals-top`
    pub losers_bracket_offset_x: Option<u32>,
    pub swiss: Option<SwissConfig>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 190.0,
            row_height: 80.0,
            match_width: 150.0,
            match_height: 60.0,
            top_offset: 50.0,
            left_offset: 0.0,
            group_gap_x: 1,
            group_gap_y: 100.0,
            bracket_alignment: BracketAlignment::default(),
            losers_bracket_offset_x: None,
            swiss: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alignment_is_bottom() {
        assert_eq!(
            LayoutConfig::default().bracket_alignment,
            BracketAlignment::Bottom
        );
    }

    #[test]
    fn test_finals_top_order() {
        let order = BracketAlignment::FinalsTop.group_order();
        assert_eq!(order[1], BracketGroup::GrandFinal);
        assert_eq!(order[2], BracketGroup::Losers);
    }

    #[test]
    fn test_partial_config_deserializes_over_defaults() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{"column_width": 220.0, "bracket_alignment": "finals-top"}"#)
                .unwrap();
        assert_eq!(cfg.column_width, 220.0);
        assert_eq!(cfg.bracket_alignment, BracketAlignment::FinalsTop);
        assert_eq!(cfg.row_height, 80.0);
    }

    #[test]
    fn test_unknown_alignment_rejected() {
        let result = serde_json::from_str::<LayoutConfig>(
            r#"{"bracket_alignment": "split-horizontal"}"#,
        );
        assert!(result.is_err());
    }
}
