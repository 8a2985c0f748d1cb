//! External stage-structure DTOs.
//!
//! These mirror the upstream API schema field for field (camelCase on the
//! wire). Unknown fields are ignored; almost everything is optional so that
//! validation can produce descriptive errors instead of serde failures.

use std::fmt;

use serde::Deserialize;

/// Stage id, accepted as either a number or a string and treated as an
/// opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Top-level stage payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStructure {
    pub stage_id: Option<StageId>,
    /// One of SINGLE_ELIMINATION, DOUBLE_ELIMINATION, ROUND_ROBIN, SWISS, FFA
    pub stage_type: Option<String>,
    #[serde(default)]
    pub stage_items: Vec<StageItem>,
}

/// A bracket-group-sized chunk of the stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageItem {
    pub id: Option<StageId>,
    pub group_index: Option<u32>,
    #[serde(default)]
    pub edges: Vec<EdgeDto>,
    #[serde(default)]
    pub rounds: Vec<RoundDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDto {
    pub number: Option<u32>,
    /// Upstream bracket group name, e.g. `WINNERS_BRACKET`
    pub bracket_group: Option<String>,
    pub date: Option<String>,
    pub best_of: Option<u32>,
    #[serde(default)]
    pub matches: Vec<MatchDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub id: Option<String>,
    pub match_index: Option<u32>,
    pub status: Option<String>,
    pub completed: Option<bool>,
    #[serde(default)]
    pub slots: Vec<SlotDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub slot: Option<u8>,
    pub team_name: Option<String>,
    pub games_won: Option<u32>,
    pub winner: Option<bool>,
    pub source_rank: Option<u8>,
}

/// Progression arc as serialized by the upstream API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDto {
    pub from_match_id: String,
    pub from_rank: u8,
    pub to_match_id: String,
    pub to_slot: u8,
}
