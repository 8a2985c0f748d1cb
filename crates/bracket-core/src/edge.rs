//! Progression edges: directed arcs between matches.

use serde::{Deserialize, Serialize};

/// Which finisher of the source match feeds the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FromRank {
    /// The winner advances along this edge
    Winner,
    /// The loser drops along this edge (winners-to-losers transfers)
    Loser,
}

impl From<FromRank> for u8 {
    fn from(rank: FromRank) -> u8 {
        match rank {
            FromRank::Winner => 1,
            FromRank::Loser => 2,
        }
    }
}

impl TryFrom<u8> for FromRank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Winner),
            2 => Ok(Self::Loser),
            other => Err(format!("invalid source rank {other}, expected 1 or 2")),
        }
    }
}

/// Target slot of the destination match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ToSlot {
    Slot1,
    Slot2,
}

impl From<ToSlot> for u8 {
    fn from(slot: ToSlot) -> u8 {
        match slot {
            ToSlot::Slot1 => 1,
            ToSlot::Slot2 => 2,
        }
    }
}

impl TryFrom<u8> for ToSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Slot1),
            2 => Ok(Self::Slot2),
            other => Err(format!("invalid target slot {other}, expected 1 or 2")),
        }
    }
}

/// A directed progression arc from one match to a slot of another.
///
/// Edges are structural input supplied alongside the matches, never derived
/// by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from_match_id: String,
    pub from_rank: FromRank,
    pub to_match_id: String,
    pub to_slot: ToSlot,
}

impl Edge {
    /// Winner-advancement edge into the given slot.
    pub fn winner(from: impl Into<String>, to: impl Into<String>, slot: ToSlot) -> Self {
        Self {
            from_match_id: from.into(),
            from_rank: FromRank::Winner,
            to_match_id: to.into(),
            to_slot: slot,
        }
    }

    /// Loser-drop edge into the given slot.
    pub fn loser(from: impl Into<String>, to: impl Into<String>, slot: ToSlot) -> Self {
        Self {
            from_match_id: from.into(),
            from_rank: FromRank::Loser,
            to_match_id: to.into(),
            to_slot: slot,
        }
    }
}
