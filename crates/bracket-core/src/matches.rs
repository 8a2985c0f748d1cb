//! Match types: the nodes of the layout graph.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not yet playable (opponents unknown or schedule pending)
    #[default]
    Locked,
    /// Currently being played
    Running,
    /// Finished
    Completed,
}

impl MatchStatus {
    /// Stable lowercase name, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

/// Outcome marker for one side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentResult {
    Win,
    Loss,
}

/// One side of a match: an optional participant with score and result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Opponent {
    /// Participant id assigned by the converter (1-based), if known
    pub participant_id: Option<u32>,
    /// Games won by this side
    pub score: Option<u32>,
    /// Win/loss marker once decided
    pub result: Option<OpponentResult>,
    /// Source rank this slot is fed from (1 = winner, 2 = loser)
    pub position: Option<u8>,
}

/// Swiss-stage annotations carried on a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SwissMeta {
    /// Wins in the participants' shared record, if known
    pub wins: Option<u32>,
    /// Losses in the participants' shared record, if known
    pub losses: Option<u32>,
    /// Scheduled date of the Swiss round
    pub round_date: Option<String>,
    /// Best-of setting of the Swiss round
    pub best_of: Option<u32>,
}

/// A single contest between two slots.
///
/// The layout engine only reads matches; the one exception is the Swiss
/// engine persisting inferred records into [`SwissMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Stable identifier, unique within a stage
    pub id: String,
    /// Group id; its substrings drive [`BracketGroup`](crate::BracketGroup)
    /// classification
    pub group_id: String,
    /// Round id; carries the round number as a `round-<N>` suffix
    pub round_id: String,
    /// Ordering number within the round
    pub number: u32,
    pub status: MatchStatus,
    pub opponent1: Option<Opponent>,
    pub opponent2: Option<Opponent>,
    /// Swiss annotations, absent for elimination stages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swiss: Option<SwissMeta>,
}

impl Match {
    /// Create a match with the given identity; opponents default to empty.
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        round_id: impl Into<String>,
        number: u32,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            round_id: round_id.into(),
            number,
            status: MatchStatus::Locked,
            opponent1: None,
            opponent2: None,
            swiss: None,
        }
    }

    /// Round number parsed from the round id, defaulting to 1.
    pub fn round_number(&self) -> u32 {
        parse_round_number(&self.round_id).unwrap_or(1)
    }
}

/// Extract `N` from the first `round-<N>` occurrence in an id.
pub fn parse_round_number(id: &str) -> Option<u32> {
    let mut rest = id;
    while let Some(pos) = rest.find("round-") {
        let digits: &str = {
            let tail = &rest[pos + 6..];
            let end = tail
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(tail.len());
            &tail[..end]
        };
        if !digits.is_empty() {
            if let Ok(n) = digits.parse() {
                return Some(n);
            }
        }
        rest = &rest[pos + 6..];
    }
    None
}
