//! Swiss stage layout.
//!
//! Swiss matches are grouped into record buckets (shared win-loss history)
//! and laid out as one column panel per bucket, ordered by games played and
//! then by wins. Swiss layouts carry no connectors.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use log::warn;

use bracket_core::{
    BracketLayout, LayoutConfig, Match, MatchPosition, RoundHeader, SwissMeta,
    SwissPanelPosition, SwissZone,
};

use crate::elimination::{CANVAS_MARGIN, HEADER_RISE};

/// Vertical space reserved for the panel header above the first match row.
const PANEL_HEADER_HEIGHT: f64 = 60.0;

/// Lay out a Swiss stage as record-bucket panels.
///
/// Matches without an explicit record get one inferred (see
/// [`infer_records`]); the inferred record is persisted into the match's
/// [`SwissMeta`] so downstream consumers see the same buckets the layout
/// used. This is the only place the layout pipeline writes to a match.
pub fn compute_swiss_layout(matches: &mut [Match], config: &LayoutConfig) -> BracketLayout {
    if matches.is_empty() {
        return BracketLayout::empty();
    }

    let records = infer_records(matches);
    for (m, &(wins, losses)) in matches.iter_mut().zip(&records) {
        let meta = m.swiss.get_or_insert_with(SwissMeta::default);
        meta.wins = Some(wins);
        meta.losses = Some(losses);
    }

    // Bucket by record, ordered by games played ascending, wins descending:
    // 0-0 | 1-0, 0-1 | 2-0, 1-1, 0-2 | ...
    let mut buckets: BTreeMap<(u32, Reverse<u32>), Vec<usize>> = BTreeMap::new();
    for (i, &(wins, losses)) in records.iter().enumerate() {
        buckets.entry((wins + losses, Reverse(wins))).or_default().push(i);
    }

    let max_games = buckets.keys().map(|&(games, _)| games).max().unwrap_or(0);
    let swiss_config = config.swiss.unwrap_or_default();
    let max_wins = swiss_config.max_wins.unwrap_or(max_games);
    let max_losses = swiss_config.max_losses.unwrap_or(max_games);

    let mut match_positions = HashMap::with_capacity(matches.len());
    let mut panel_positions = Vec::with_capacity(buckets.len());
    let mut header_positions = Vec::with_capacity(buckets.len());
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;

    for (col, ((games, Reverse(wins)), mut indices)) in buckets.into_iter().enumerate() {
        let losses = games - wins;
        indices.sort_by(|&a, &b| {
            matches[a]
                .number
                .cmp(&matches[b].number)
                .then_with(|| matches[a].id.cmp(&matches[b].id))
        });

        let x_px = config.left_offset + col as f64 * config.column_width;
        for (lane, &i) in indices.iter().enumerate() {
            let y_px = config.top_offset + lane as f64 * config.row_height;
            match_positions.insert(
                matches[i].id.clone(),
                MatchPosition {
                    x_round: col as u32,
                    y_lane: lane,
                    x_px,
                    y_px,
                },
            );
            max_y = max_y.max(y_px + config.match_height);
        }

        let zone = if max_wins > 0 && wins == max_wins {
            SwissZone::Advancing
        } else if max_losses > 0 && losses == max_losses {
            SwissZone::Eliminated
        } else {
            SwissZone::Neutral
        };

        let first_meta = matches[indices[0]].swiss.as_ref();
        let height = indices.len() as f64 * config.row_height + PANEL_HEADER_HEIGHT;
        let panel = SwissPanelPosition {
            key: format!("{wins}-{losses}"),
            round_number: games + 1,
            date: first_meta.and_then(|s| s.round_date.clone()),
            best_of: first_meta.and_then(|s| s.best_of),
            x_px,
            y_px: config.top_offset - PANEL_HEADER_HEIGHT,
            width: config.column_width,
            height,
            match_count: indices.len(),
            zone,
        };
        max_x = max_x.max(panel.x_px + panel.width);
        max_y = max_y.max(panel.y_px + panel.height);

        header_positions.push(RoundHeader {
            x_round: col as u32,
            x_px: panel.x_px,
            y_px: config.top_offset - HEADER_RISE,
        });
        panel_positions.push(panel);
    }

    for p in match_positions.values() {
        max_x = max_x.max(p.x_px + config.match_width);
    }

    BracketLayout {
        match_positions,
        header_positions,
        connectors: Vec::new(),
        panel_positions: Some(panel_positions),
        group_offset_y: None,
        total_width: max_x + CANVAS_MARGIN,
        total_height: max_y + CANVAS_MARGIN,
    }
}

/// Determine the `(wins, losses)` record of every match.
///
/// Explicit records from [`SwissMeta`] win. Round-1 matches are `0-0`.
/// Anything else falls back to an approximate partition of the round into
/// `games + 1` equal buckets in match-number order, with a data-quality
/// warning: explicit records should be supplied whenever available.
fn infer_records(matches: &[Match]) -> Vec<(u32, u32)> {
    let mut by_round: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, m) in matches.iter().enumerate() {
        by_round.entry(m.round_number()).or_default().push(i);
    }
    for indices in by_round.values_mut() {
        indices.sort_by(|&a, &b| {
            matches[a]
                .number
                .cmp(&matches[b].number)
                .then_with(|| matches[a].id.cmp(&matches[b].id))
        });
    }

    let mut records = vec![(0, 0); matches.len()];
    for (&round, indices) in &by_round {
        for (pos, &i) in indices.iter().enumerate() {
            let m = &matches[i];
            let explicit = m
                .swiss
                .as_ref()
                .and_then(|s| Some((s.wins?, s.losses?)));
            records[i] = match explicit {
                Some(record) => record,
                None if round <= 1 => (0, 0),
                None => {
                    warn!(
                        "match {} has no explicit swiss record; approximating from round position",
                        m.id
                    );
                    let games = round - 1;
                    let bucket_count = games as usize + 1;
                    let bucket_size = indices.len().div_ceil(bucket_count);
                    let bucket = (pos / bucket_size) as u32;
                    (games.saturating_sub(bucket), bucket.min(games))
                }
            };
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::SwissConfig;

    fn swiss_match(id: &str, round: u32, number: u32, record: Option<(u32, u32)>) -> Match {
        let mut m = Match::new(
            id.to_string(),
            "s1-swiss-bracket",
            format!("s1-swiss-bracket-round-{round}"),
            number,
        );
        if let Some((wins, losses)) = record {
            m.swiss = Some(SwissMeta {
                wins: Some(wins),
                losses: Some(losses),
                round_date: None,
                best_of: None,
            });
        }
        m
    }

    /// 4-team, 3-round stage with explicit records.
    fn four_team_three_rounds() -> Vec<Match> {
        vec![
            swiss_match("r1m1", 1, 1, Some((0, 0))),
            swiss_match("r1m2", 1, 2, Some((0, 0))),
            swiss_match("r2m1", 2, 1, Some((1, 0))),
            swiss_match("r2m2", 2, 2, Some((0, 1))),
            swiss_match("r3m1", 3, 1, Some((2, 0))),
            swiss_match("r3m2", 3, 2, Some((1, 1))),
            swiss_match("r3m3", 3, 3, Some((0, 2))),
        ]
    }

    #[test]
    fn test_bucket_column_order() {
        let mut matches = four_team_three_rounds();
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());

        let panels = layout.panel_positions.as_ref().unwrap();
        let keys: Vec<&str> = panels.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["0-0", "1-0", "0-1", "2-0", "1-1", "0-2"]);

        for (col, panel) in panels.iter().enumerate() {
            assert_eq!(panel.x_px, col as f64 * 190.0);
        }
        assert_eq!(layout.match_positions["r2m1"].x_round, 1);
        assert_eq!(layout.match_positions["r2m2"].x_round, 2);
    }

    #[test]
    fn test_no_connectors() {
        let mut matches = four_team_three_rounds();
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn test_panel_round_numbers_and_counts() {
        let mut matches = four_team_three_rounds();
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());

        let panels = layout.panel_positions.as_ref().unwrap();
        let total: usize = panels.iter().map(|p| p.match_count).sum();
        assert_eq!(total, matches.len());
        for p in panels {
            let (wins, losses) = p.key.split_once('-').unwrap();
            let wins: u32 = wins.parse().unwrap();
            let losses: u32 = losses.parse().unwrap();
            assert_eq!(p.round_number, wins + losses + 1);
        }
    }

    #[test]
    fn test_zones_from_derived_thresholds() {
        let mut matches = four_team_three_rounds();
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());

        let panels = layout.panel_positions.as_ref().unwrap();
        let zone = |key: &str| panels.iter().find(|p| p.key == key).unwrap().zone;
        assert_eq!(zone("2-0"), SwissZone::Advancing);
        assert_eq!(zone("0-2"), SwissZone::Eliminated);
        assert_eq!(zone("1-1"), SwissZone::Neutral);
        assert_eq!(zone("0-0"), SwissZone::Neutral);
    }

    #[test]
    fn test_explicit_thresholds() {
        let mut matches = four_team_three_rounds();
        let mut config = LayoutConfig::default();
        config.swiss = Some(SwissConfig {
            max_wins: Some(3),
            max_losses: Some(3),
        });
        let layout = compute_swiss_layout(&mut matches, &config);
        let panels = layout.panel_positions.as_ref().unwrap();
        assert!(panels.iter().all(|p| p.zone == SwissZone::Neutral));
    }

    #[test]
    fn test_fallback_record_partition() {
        // Round 3 without explicit records: three matches split into three
        // record buckets by match number.
        let mut matches = vec![
            swiss_match("a", 3, 1, None),
            swiss_match("b", 3, 2, None),
            swiss_match("c", 3, 3, None),
        ];
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());

        let record = |m: &Match| {
            let s = m.swiss.as_ref().unwrap();
            (s.wins.unwrap(), s.losses.unwrap())
        };
        assert_eq!(record(&matches[0]), (2, 0));
        assert_eq!(record(&matches[1]), (1, 1));
        assert_eq!(record(&matches[2]), (0, 2));
        assert_eq!(layout.panel_positions.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_round_one_defaults_to_zero_record() {
        let mut matches = vec![swiss_match("a", 1, 1, None), swiss_match("b", 1, 2, None)];
        let layout = compute_swiss_layout(&mut matches, &LayoutConfig::default());

        let panels = layout.panel_positions.as_ref().unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].key, "0-0");
        assert_eq!(panels[0].match_count, 2);
        // Stacked top to bottom by number.
        assert_eq!(layout.match_positions["a"].y_lane, 0);
        assert_eq!(layout.match_positions["b"].y_lane, 1);
    }

    #[test]
    fn test_panel_geometry() {
        let mut matches = four_team_three_rounds();
        let config = LayoutConfig::default();
        let layout = compute_swiss_layout(&mut matches, &config);

        let panels = layout.panel_positions.as_ref().unwrap();
        for p in panels {
            assert_eq!(p.y_px, config.top_offset - 60.0);
            assert_eq!(p.width, config.column_width);
            assert_eq!(
                p.height,
                p.match_count as f64 * config.row_height + 60.0
            );
        }
        assert_eq!(layout.header_positions.len(), panels.len());
    }

    #[test]
    fn test_empty_input() {
        let layout = compute_swiss_layout(&mut [], &LayoutConfig::default());
        assert_eq!(layout, BracketLayout::empty());
    }
}
