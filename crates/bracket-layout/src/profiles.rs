//! Double-elimination format profiles.
//!
//! The generic column assignment places each bracket group's rounds in its
//! own horizontal band, which spreads a double-elimination stage much wider
//! than necessary. Profiles interleave winners and losers rounds on a shared
//! column axis so that rounds played at the same time sit in nearby columns:
//! winners round r occupies column `2(r-1)`, which puts the losers round
//! receiving its drops (losers round `2(r-1)`) in the same column, and the
//! grand final follows the last losers column.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use bracket_core::{BracketGroup, Match};

/// Explicit round-to-column tables for one known tournament size.
#[derive(Debug, Clone)]
pub struct FormatProfile {
    /// Registry identifier, e.g. `"de-16"`
    pub id: &'static str,
    /// Number of entrants this profile is built for
    pub format_size: u32,
    pub winners_round_columns: BTreeMap<u32, u32>,
    pub losers_round_columns: BTreeMap<u32, u32>,
    pub finals_columns: BTreeMap<u32, u32>,
}

impl FormatProfile {
    /// Column table for a bracket group, if this profile covers it.
    /// Placement brackets always fall back to the generic assignment.
    pub fn columns_for(&self, group: BracketGroup) -> Option<&BTreeMap<u32, u32>> {
        match group {
            BracketGroup::Winners => Some(&self.winners_round_columns),
            BracketGroup::Losers => Some(&self.losers_round_columns),
            BracketGroup::GrandFinal => Some(&self.finals_columns),
            BracketGroup::Placement => None,
        }
    }
}

fn build_profile(id: &'static str, format_size: u32) -> FormatProfile {
    // format_size is a power of two, so trailing_zeros is the number of
    // winners rounds.
    let winners_rounds = format_size.trailing_zeros();
    let losers_rounds = 2 * (winners_rounds - 1);

    let winners_round_columns: BTreeMap<u32, u32> = (1..=winners_rounds)
        .map(|r| (r, if r == 1 { 0 } else { 2 * (r - 1) }))
        .collect();
    let losers_round_columns: BTreeMap<u32, u32> =
        (1..=losers_rounds).map(|r| (r, r)).collect();
    let finals_columns: BTreeMap<u32, u32> =
        [(1, losers_rounds + 1), (2, losers_rounds + 2)].into_iter().collect();

    FormatProfile {
        id,
        format_size,
        winners_round_columns,
        losers_round_columns,
        finals_columns,
    }
}

static PROFILES: LazyLock<Vec<FormatProfile>> = LazyLock::new(|| {
    vec![
        build_profile("de-8", 8),
        build_profile("de-16", 16),
        build_profile("de-32", 32),
    ]
});

/// Look up the registered profile for a tournament size.
pub fn profile_for_size(size: u32) -> Option<&'static FormatProfile> {
    PROFILES.iter().find(|p| p.format_size == size)
}

/// Detect the tournament size from the winners-bracket round-1 match count
/// and return the registered profile, if any.
///
/// Unregistered sizes return `None`, which defers to the generic column
/// assignment.
pub fn detect_profile(matches: &[Match]) -> Option<&'static FormatProfile> {
    let wb_round1 = matches
        .iter()
        .filter(|m| {
            BracketGroup::classify(&m.group_id) == BracketGroup::Winners
                && m.round_number() == 1
        })
        .count() as u32;

    profile_for_size(wb_round1 * 2)
}
