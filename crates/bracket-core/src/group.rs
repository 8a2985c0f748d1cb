//! Bracket group classification.
//!
//! Group ids are free-form strings composed by the stage converter
//! (e.g. `"s1-winners-bracket"`, `"s1-loser-bracket"`). Classification is
//! substring based and case insensitive, with a fixed precedence:
//! placement markers first, then losers, then finals, and everything
//! unrecognized lands in the winners bracket.

use serde::{Deserialize, Serialize};

/// Semantic classification of a bracket group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketGroup {
    /// Winners / upper bracket (also the default for unclassified ids)
    Winners,
    /// Losers / lower bracket
    Losers,
    /// Grand final (including bracket-reset games)
    GrandFinal,
    /// Placement games (third place and similar)
    Placement,
}

impl BracketGroup {
    /// Canonical display order: winners, losers, grand final, placement.
    pub const DISPLAY_ORDER: [BracketGroup; 4] = [
        BracketGroup::Winners,
        BracketGroup::Losers,
        BracketGroup::GrandFinal,
        BracketGroup::Placement,
    ];

    /// Display order used when the grand final shares the top band with
    /// the winners bracket.
    pub const FINALS_TOP_ORDER: [BracketGroup; 4] = [
        BracketGroup::Winners,
        BracketGroup::GrandFinal,
        BracketGroup::Losers,
        BracketGroup::Placement,
    ];

    /// Classify a group id by substring.
    ///
    /// Precedence: placement markers ("placement", "third", "3rd") before
    /// losers markers ("loser", "lower") before finals markers
    /// ("grand-final", then "final" alone). A group id carrying both a
    /// losers and a finals marker (a losers-bracket final) classifies as
    /// losers. Anything else, including explicit "winner"/"upper" markers,
    /// is the winners bracket.
    pub fn classify(group_id: &str) -> Self {
        let id = group_id.to_ascii_lowercase();

        if id.contains("placement") || id.contains("third") || id.contains("3rd") {
            return Self::Placement;
        }
        if id.contains("loser") || id.contains("lower") {
            return Self::Losers;
        }
        if id.contains("grand-final") || id.contains("final") {
            return Self::GrandFinal;
        }
        Self::Winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(BracketGroup::classify("g-grand-final"), BracketGroup::GrandFinal);
        assert_eq!(BracketGroup::classify("g-final"), BracketGroup::GrandFinal);
        assert_eq!(BracketGroup::classify("g-loser-final"), BracketGroup::Losers);
        assert_eq!(BracketGroup::classify("g-third-place"), BracketGroup::Placement);
        assert_eq!(BracketGroup::classify("g-winners-bracket"), BracketGroup::Winners);
        assert_eq!(BracketGroup::classify("g-random"), BracketGroup::Winners);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(BracketGroup::classify("G-LOWER-BRACKET"), BracketGroup::Losers);
        assert_eq!(BracketGroup::classify("Stage-3RD-Place"), BracketGroup::Placement);
    }

    #[test]
    fn test_classify_placement_before_losers() {
        // A placement marker wins even when a losers marker is present.
        assert_eq!(
            BracketGroup::classify("lower-third-place"),
            BracketGroup::Placement
        );
    }

    #[test]
    fn test_classify_upper_is_winners() {
        assert_eq!(BracketGroup::classify("s1-upper-bracket"), BracketGroup::Winners);
    }
}
