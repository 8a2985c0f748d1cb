//! Canonicalization of external stage structures.
//!
//! Composes the group/round/match ids the layout engine's classification
//! relies on, deduplicates participants, maps statuses and slots, annotates
//! Swiss matches, and flattens the per-item edge lists.

use std::collections::HashMap;

use log::warn;
use serde::Serialize;

use bracket_core::{
    BracketKind, Edge, Match, MatchStatus, Opponent, OpponentResult, SwissMeta,
};

use crate::stage::{EdgeDto, SlotDto, StageStructure};

/// Conversion failures. These abort the whole conversion; everything else
/// is recovered with defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("stage structure is missing a stage id")]
    MissingStageId,

    #[error("stage structure is missing a stage type")]
    MissingStageType,

    #[error("unsupported stage type: {0}")]
    UnsupportedStageType(String),
}

/// Standings table keyed by team name, used as a fallback source of Swiss
/// records.
pub type Standings = HashMap<String, (u32, u32)>;

/// A participant deduplicated by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// 1-based id in order of first appearance
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageSettings {
    pub group_count: usize,
}

/// Stage header of the converted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMeta {
    pub id: String,
    pub kind: BracketKind,
    pub settings: StageSettings,
}

/// Everything the viewer needs: stage header, participants, and the
/// match-and-edge graph the layout engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerData {
    pub stages: Vec<StageMeta>,
    pub participants: Vec<Participant>,
    pub matches: Vec<Match>,
    pub edges: Vec<Edge>,
}

/// Convert an external stage structure into viewer data.
///
/// `standings` optionally supplies Swiss records for matches whose ids do
/// not carry one.
pub fn convert_stage(
    stage: &StageStructure,
    standings: Option<&Standings>,
) -> Result<ViewerData, ConvertError> {
    let stage_id = stage
        .stage_id
        .as_ref()
        .ok_or(ConvertError::MissingStageId)?
        .to_string();
    let stage_type = stage
        .stage_type
        .as_deref()
        .ok_or(ConvertError::MissingStageType)?;
    let kind = match stage_type.to_ascii_uppercase().as_str() {
        "SINGLE_ELIMINATION" => BracketKind::SingleElimination,
        "DOUBLE_ELIMINATION" => BracketKind::DoubleElimination,
        "ROUND_ROBIN" => BracketKind::RoundRobin,
        "SWISS" => BracketKind::Swiss,
        other => return Err(ConvertError::UnsupportedStageType(other.to_string())),
    };

    let mut participants = ParticipantRegistry::default();
    let mut matches = Vec::new();
    let mut edges = Vec::new();

    for (item_index, item) in stage.stage_items.iter().enumerate() {
        let item_key = match &item.id {
            Some(id) => id.to_string(),
            None => (item_index + 1).to_string(),
        };

        for (round_index, round) in item.rounds.iter().enumerate() {
            let slug = round
                .bracket_group
                .as_deref()
                .map(group_slug)
                .unwrap_or_else(|| "bracket".to_string());
            let group_id = format!("{item_key}-{slug}");
            let round_number = round.number.unwrap_or(round_index as u32 + 1);
            let round_id = format!("{group_id}-round-{round_number}");

            for (match_index, dto) in round.matches.iter().enumerate() {
                let number = dto.match_index.unwrap_or(match_index as u32 + 1);
                let id = dto
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{round_id}-match-{number}"));

                let status = match (&dto.status, dto.completed) {
                    (Some(s), _) => map_status(s),
                    (None, Some(true)) => MatchStatus::Completed,
                    _ => MatchStatus::Locked,
                };

                let opponent1 = slot_opponent(&dto.slots, 1, &mut participants);
                let opponent2 = slot_opponent(&dto.slots, 2, &mut participants);

                let swiss = (kind == BracketKind::Swiss).then(|| {
                    let mut meta = SwissMeta {
                        round_date: round.date.clone(),
                        best_of: round.best_of,
                        ..SwissMeta::default()
                    };
                    let record = record_from_id(&id).or_else(|| {
                        let name = opponent1
                            .as_ref()
                            .and_then(|o| o.participant_id)
                            .and_then(|pid| participants.name_of(pid));
                        name.and_then(|n| standings?.get(n).copied())
                    });
                    if let Some((wins, losses)) = record {
                        meta.wins = Some(wins);
                        meta.losses = Some(losses);
                    }
                    meta
                });

                matches.push(Match {
                    id,
                    group_id: group_id.clone(),
                    round_id: round_id.clone(),
                    number,
                    status,
                    opponent1,
                    opponent2,
                    swiss,
                });
            }
        }

        for dto in &item.edges {
            match convert_edge(dto) {
                Some(edge) => edges.push(edge),
                None => warn!(
                    "dropping edge {} -> {}: rank {} / slot {} out of range",
                    dto.from_match_id, dto.to_match_id, dto.from_rank, dto.to_slot
                ),
            }
        }
    }

    Ok(ViewerData {
        stages: vec![StageMeta {
            id: stage_id,
            kind,
            settings: StageSettings {
                group_count: stage.stage_items.len(),
            },
        }],
        participants: participants.list,
        matches,
        edges,
    })
}

/// Lowercase a bracket-group name and turn underscores into dashes, e.g.
/// `WINNERS_BRACKET` -> `winners-bracket`.
fn group_slug(name: &str) -> String {
    name.to_ascii_lowercase().replace('_', "-")
}

fn map_status(status: &str) -> MatchStatus {
    match status.to_ascii_uppercase().as_str() {
        "LIVE" | "RUNNING" | "IN_PROGRESS" => MatchStatus::Running,
        "COMPLETE" | "COMPLETED" | "FINISHED" => MatchStatus::Completed,
        "UNSCHEDULED" | "PENDING" | "INCOMPLETE" => MatchStatus::Locked,
        _ => MatchStatus::Locked,
    }
}

fn convert_edge(dto: &EdgeDto) -> Option<Edge> {
    Some(Edge {
        from_match_id: dto.from_match_id.clone(),
        from_rank: dto.from_rank.try_into().ok()?,
        to_match_id: dto.to_match_id.clone(),
        to_slot: dto.to_slot.try_into().ok()?,
    })
}

/// Build the opponent for slot 1 or 2, preferring explicit slot numbers and
/// falling back to positional order.
fn slot_opponent(
    slots: &[SlotDto],
    which: u8,
    participants: &mut ParticipantRegistry,
) -> Option<Opponent> {
    let dto = slots
        .iter()
        .find(|s| s.slot == Some(which))
        .or_else(|| slots.get(which as usize - 1))?;

    Some(Opponent {
        participant_id: dto.team_name.as_deref().map(|n| participants.intern(n)),
        score: dto.games_won,
        result: (dto.winner == Some(true)).then_some(OpponentResult::Win),
        position: dto.source_rank,
    })
}

/// Parse a `match-<W>-<L>-...` record out of a semantic match id.
fn record_from_id(id: &str) -> Option<(u32, u32)> {
    let mut rest = id;
    while let Some(pos) = rest.find("match-") {
        rest = &rest[pos + 6..];
        if let Some(record) = parse_record(rest) {
            return Some(record);
        }
    }
    None
}

fn parse_record(s: &str) -> Option<(u32, u32)> {
    let (wins, rest) = parse_number(s)?;
    let rest = rest.strip_prefix('-')?;
    let (losses, _) = parse_number(rest)?;
    Some((wins, losses))
}

fn parse_number(s: &str) -> Option<(u32, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((s[..end].parse().ok()?, &s[end..]))
}

/// Participants deduplicated by name, ids handed out in order of first
/// appearance.
#[derive(Debug, Default)]
struct ParticipantRegistry {
    by_name: HashMap<String, u32>,
    list: Vec<Participant>,
}

impl ParticipantRegistry {
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = self.list.len() as u32 + 1;
        self.by_name.insert(name.to_string(), id);
        self.list.push(Participant {
            id,
            name: name.to_string(),
        });
        id
    }

    fn name_of(&self, id: u32) -> Option<&str> {
        self.list
            .get(id.checked_sub(1)? as usize)
            .map(|p| p.name.as_str())
    }
}
