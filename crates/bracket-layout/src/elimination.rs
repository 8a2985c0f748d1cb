//! Elimination bracket layout.
//!
//! Positions single- and double-elimination matches on a 2D canvas. Each
//! bracket group gets a run of columns (one per round), matches get lanes
//! centered on the matches that feed them, and progression edges become
//! 4-point Z-polyline connectors.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use bracket_core::{
    BracketAlignment, BracketGroup, BracketKind, BracketLayout, ConnectorLine, ConnectorType,
    Edge, LayoutConfig, Match, MatchPosition, Point, RoundHeader,
};

use crate::profiles::FormatProfile;

/// Margin added past the far edges of the canvas.
pub(crate) const CANVAS_MARGIN: f64 = 50.0;
/// Vertical rise of round headers above the first row.
pub(crate) const HEADER_RISE: f64 = 40.0;
/// Lane step used to spread matches that collapsed onto the same lane.
const TIE_BREAK_STEP: f64 = 0.25;

/// Lay out an elimination stage.
///
/// The layout is a pure function of its inputs: identical matches, edges,
/// and configuration produce an identical layout. Recoverable defects are
/// absorbed: a round id without a number defaults to round 1, an edge with
/// a missing endpoint is skipped with a diagnostic, and an empty match list
/// yields [`BracketLayout::empty`].
pub fn compute_layout(
    matches: &[Match],
    edges: &[Edge],
    kind: BracketKind,
    config: &LayoutConfig,
    profile: Option<&FormatProfile>,
) -> BracketLayout {
    if matches.is_empty() {
        return BracketLayout::empty();
    }

    // Profiles describe double-elimination stages only.
    let profile = match kind {
        BracketKind::DoubleElimination => profile,
        _ => None,
    };

    let index = MatchIndex::build(matches);
    let columns = assign_columns(&index, config, profile);
    let lanes = assign_lanes(&index, edges);
    let offsets = group_offsets(&lanes, config);

    let mut match_positions = HashMap::with_capacity(matches.len());
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for m in matches {
        let entry = &index.by_id[m.id.as_str()];
        let col = columns[&(entry.group, entry.round)];
        let lane = lanes.index_by_id[m.id.as_str()];
        let x_px = config.left_offset + f64::from(col) * config.column_width;
        let y_px = offsets[&entry.group] + lane as f64 * config.row_height;
        match_positions.insert(
            m.id.clone(),
            MatchPosition {
                x_round: col,
                y_lane: lane,
                x_px,
                y_px,
            },
        );
        max_x = max_x.max(x_px + config.match_width);
        max_y = max_y.max(y_px + config.match_height);
    }

    let used_columns: BTreeSet<u32> = match_positions.values().map(|p| p.x_round).collect();
    let header_positions = used_columns
        .into_iter()
        .map(|col| RoundHeader {
            x_round: col,
            x_px: config.left_offset + f64::from(col) * config.column_width,
            y_px: config.top_offset - HEADER_RISE,
        })
        .collect();

    let connectors = route_connectors(edges, &match_positions, &index, config);

    BracketLayout {
        match_positions,
        header_positions,
        connectors,
        panel_positions: None,
        group_offset_y: Some(offsets),
        total_width: max_x + CANVAS_MARGIN,
        total_height: max_y + CANVAS_MARGIN,
    }
}

struct Entry {
    group: BracketGroup,
    round: u32,
    number: u32,
}

/// Matches classified and indexed for the layout walk.
struct MatchIndex<'a> {
    by_id: HashMap<&'a str, Entry>,
    /// Group -> round -> matches, matches ordered by number.
    by_group_round: BTreeMap<BracketGroup, BTreeMap<u32, Vec<&'a Match>>>,
}

impl<'a> MatchIndex<'a> {
    fn build(matches: &'a [Match]) -> Self {
        let mut by_id = HashMap::with_capacity(matches.len());
        let mut by_group_round: BTreeMap<BracketGroup, BTreeMap<u32, Vec<&'a Match>>> =
            BTreeMap::new();

        for m in matches {
            let group = BracketGroup::classify(&m.group_id);
            let round = m.round_number();
            by_id.insert(
                m.id.as_str(),
                Entry {
                    group,
                    round,
                    number: m.number,
                },
            );
            by_group_round
                .entry(group)
                .or_default()
                .entry(round)
                .or_default()
                .push(m);
        }

        for rounds in by_group_round.values_mut() {
            for ms in rounds.values_mut() {
                ms.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));
            }
        }

        Self { by_id, by_group_round }
    }
}

/// Assign a column to every (group, round) pair.
///
/// Groups are walked in the alignment's display order; each group's rounds
/// take consecutive columns from the cursor, and the cursor advances past
/// them plus the configured gap. A format profile overrides the columns of
/// the groups it covers. Under `finals-top` the losers bracket is placed at
/// its own horizontal offset without consuming the cursor.
fn assign_columns(
    index: &MatchIndex<'_>,
    config: &LayoutConfig,
    profile: Option<&FormatProfile>,
) -> BTreeMap<(BracketGroup, u32), u32> {
    let mut columns = BTreeMap::new();
    let mut current_col: u32 = 0;

    for &group in config.bracket_alignment.group_order() {
        let Some(rounds) = index.by_group_round.get(&group) else {
            continue;
        };
        let round_numbers: Vec<u32> = rounds.keys().copied().collect();

        let mut max_col: Option<u32> = None;
        if let Some(table) = profile.and_then(|p| p.columns_for(group)) {
            let mut fallback = current_col;
            for &round in &round_numbers {
                let col = match table.get(&round) {
                    Some(&col) => col,
                    None => {
                        debug!("profile has no column for {group:?} round {round}");
                        let col = fallback;
                        fallback += 1;
                        col
                    }
                };
                columns.insert((group, round), col);
                max_col = Some(max_col.map_or(col, |m| m.max(col)));
            }
        } else if config.bracket_alignment == BracketAlignment::FinalsTop
            && group == BracketGroup::Losers
        {
            let base = config.losers_bracket_offset_x.unwrap_or(0);
            for (i, &round) in round_numbers.iter().enumerate() {
                columns.insert((group, round), base + i as u32);
            }
            continue;
        } else {
            for (i, &round) in round_numbers.iter().enumerate() {
                let col = current_col + i as u32;
                columns.insert((group, round), col);
                max_col = Some(col);
            }
        }

        if let Some(max_col) = max_col {
            current_col = current_col.max(max_col + 1 + config.group_gap_x);
        }
    }

    columns
}

struct Lanes<'a> {
    index_by_id: HashMap<&'a str, usize>,
    count_by_group: BTreeMap<BracketGroup, usize>,
}

/// Assign a lane index to every match, independently per group.
///
/// A match fed by internal edges takes the mean of its feeders' lanes; a
/// match with no internal feeders takes the next free integer lane. Matches
/// that collapse onto the same lane (grand-final resets, finals next to
/// placement games) are spread apart in quarter-lane steps, then all lane
/// values are normalized to dense indices.
fn assign_lanes<'a>(index: &MatchIndex<'a>, edges: &[Edge]) -> Lanes<'a> {
    let mut index_by_id = HashMap::new();
    let mut count_by_group = BTreeMap::new();

    for (&group, rounds) in &index.by_group_round {
        let mut inbound: HashMap<&str, Vec<&str>> = HashMap::new();
        for e in edges {
            let from = index.by_id.get(e.from_match_id.as_str());
            let to = index.by_id.get(e.to_match_id.as_str());
            if let (Some(from), Some(to)) = (from, to) {
                if from.group == group && to.group == group {
                    inbound
                        .entry(e.to_match_id.as_str())
                        .or_default()
                        .push(e.from_match_id.as_str());
                }
            }
        }

        // Feeder-centered float lanes, rounds ascending, numbers ascending.
        let mut floats: HashMap<&'a str, f64> = HashMap::new();
        let mut next_lane = 0u32;
        for ms in rounds.values() {
            for m in ms {
                let feeders: Vec<f64> = inbound
                    .get(m.id.as_str())
                    .map(|sources| {
                        sources.iter().filter_map(|s| floats.get(*s).copied()).collect()
                    })
                    .unwrap_or_default();
                let lane = if feeders.is_empty() {
                    let lane = f64::from(next_lane);
                    next_lane += 1;
                    lane
                } else {
                    feeders.iter().sum::<f64>() / feeders.len() as f64
                };
                floats.insert(m.id.as_str(), lane);
            }
        }

        // Spread lane collisions around the shared value.
        let mut buckets: BTreeMap<i64, Vec<&'a str>> = BTreeMap::new();
        for (&id, &lane) in &floats {
            buckets.entry(lane_key(lane)).or_default().push(id);
        }
        for (key, mut ids) in buckets {
            if ids.len() < 2 {
                continue;
            }
            ids.sort_by(|a, b| {
                let (ea, eb) = (&index.by_id[*a], &index.by_id[*b]);
                ea.round
                    .cmp(&eb.round)
                    .then(ea.number.cmp(&eb.number))
                    .then(a.cmp(b))
            });
            let base = key as f64 / 1000.0;
            let len = ids.len() as f64;
            for (i, id) in ids.into_iter().enumerate() {
                floats.insert(id, base + (i as f64 - (len - 1.0) / 2.0) * TIE_BREAK_STEP);
            }
        }

        // Normalize to dense indices.
        let keys: BTreeSet<i64> = floats.values().map(|&f| lane_key(f)).collect();
        let order: HashMap<i64, usize> =
            keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        for (&id, &lane) in &floats {
            index_by_id.insert(id, order[&lane_key(lane)]);
        }
        count_by_group.insert(group, keys.len().max(1));
    }

    Lanes {
        index_by_id,
        count_by_group,
    }
}

/// Lanes compare equal when they agree to three decimals.
fn lane_key(lane: f64) -> i64 {
    (lane * 1000.0).round() as i64
}

/// Vertical offset of each group's first lane.
fn group_offsets(lanes: &Lanes<'_>, config: &LayoutConfig) -> BTreeMap<BracketGroup, f64> {
    let heights: BTreeMap<BracketGroup, f64> = lanes
        .count_by_group
        .iter()
        .map(|(&g, &n)| (g, n as f64 * config.row_height))
        .collect();

    let mut offsets = BTreeMap::new();
    match config.bracket_alignment {
        BracketAlignment::Top | BracketAlignment::Bottom => {
            let mut y = config.top_offset;
            for &group in &BracketGroup::DISPLAY_ORDER {
                if let Some(&h) = heights.get(&group) {
                    offsets.insert(group, y);
                    y += h + config.group_gap_y;
                }
            }
        }
        BracketAlignment::Center => {
            let max_height = heights.values().fold(0.0_f64, |a, &b| a.max(b));
            let mut band = 0.0;
            for &group in &BracketGroup::DISPLAY_ORDER {
                if let Some(&h) = heights.get(&group) {
                    offsets.insert(group, config.top_offset + band + (max_height - h) / 2.0);
                    band += max_height + config.group_gap_y;
                }
            }
        }
        BracketAlignment::FinalsTop => {
            let winners_h = heights.get(&BracketGroup::Winners).copied().unwrap_or(0.0);
            let finals_h = heights.get(&BracketGroup::GrandFinal).copied().unwrap_or(0.0);
            let mut y = config.top_offset;
            if heights.contains_key(&BracketGroup::Winners) {
                offsets.insert(BracketGroup::Winners, y);
            }
            if heights.contains_key(&BracketGroup::GrandFinal) {
                offsets.insert(BracketGroup::GrandFinal, y);
            }
            if winners_h > 0.0 || finals_h > 0.0 {
                y += winners_h.max(finals_h) + config.group_gap_y;
            }
            if let Some(&h) = heights.get(&BracketGroup::Losers) {
                offsets.insert(BracketGroup::Losers, y);
                y += h + config.group_gap_y;
            }
            if heights.contains_key(&BracketGroup::Placement) {
                offsets.insert(BracketGroup::Placement, y);
            }
        }
    }

    offsets
}

/// Route each edge as a 4-point Z-polyline between its endpoint cards.
///
/// Both slots anchor to the vertical center of the card; slot-based offsets
/// are a renderer concern. Edges with an unpositioned endpoint are skipped.
fn route_connectors(
    edges: &[Edge],
    positions: &HashMap<String, MatchPosition>,
    index: &MatchIndex<'_>,
    config: &LayoutConfig,
) -> Vec<ConnectorLine> {
    let mut connectors = Vec::with_capacity(edges.len());

    for e in edges {
        let (Some(from), Some(to)) = (
            positions.get(&e.from_match_id),
            positions.get(&e.to_match_id),
        ) else {
            debug!(
                "skipping connector {} -> {}: endpoint not positioned",
                e.from_match_id, e.to_match_id
            );
            continue;
        };

        let from_x = from.x_px + config.match_width;
        let from_y = from.y_px + config.match_height / 2.0;
        let to_x = to.x_px;
        let to_y = to.y_px + config.match_height / 2.0;
        let mid_x = (from_x + to_x) / 2.0;

        let connector_type = ConnectorType::classify(
            index.by_id[e.from_match_id.as_str()].group,
            index.by_id[e.to_match_id.as_str()].group,
        );

        connectors.push(ConnectorLine {
            from_match_id: e.from_match_id.clone(),
            to_match_id: e.to_match_id.clone(),
            points: [
                Point::new(from_x, from_y),
                Point::new(mid_x, from_y),
                Point::new(mid_x, to_y),
                Point::new(to_x, to_y),
            ],
            connector_type,
        });
    }

    connectors
}
