//! Content-keyed memoization for elimination layouts.
//!
//! Keys are derived from everything the layout depends on: match ids,
//! statuses, and scores, edge endpoints, and the layout-sensitive
//! configuration fields. Identical content hashes to the same key
//! regardless of input ordering. Swiss layouts are not cached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use bracket_core::{BracketKind, BracketLayout, Edge, LayoutConfig, Match, Opponent};

use crate::elimination::compute_layout;
use crate::profiles::FormatProfile;

/// Default entry capacity.
pub const DEFAULT_MAX_ENTRIES: usize = 50;
/// Default time-to-live per entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    layout: BracketLayout,
    inserted_at: Instant,
    hit_count: u64,
}

/// Usage counters reported by [`LayoutCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

/// Bounded, TTL-expiring layout cache.
///
/// At capacity, the entry with the lowest hit count is evicted. The cache
/// is a plain owned value; callers that share one across threads wrap it in
/// a `Mutex` guarding both [`get`](Self::get) and [`insert`](Self::insert).
pub struct LayoutCache {
    entries: HashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }

    pub fn with_limits(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Derive the content key for a layout computation.
    pub fn key(
        matches: &[Match],
        edges: &[Edge],
        kind: BracketKind,
        config: &LayoutConfig,
    ) -> String {
        let mut match_parts: Vec<String> = matches
            .iter()
            .map(|m| {
                format!(
                    "{}:{}:{}:{}",
                    m.id,
                    m.status.as_str(),
                    score_part(&m.opponent1),
                    score_part(&m.opponent2)
                )
            })
            .collect();
        match_parts.sort();

        let mut edge_parts: Vec<String> = edges
            .iter()
            .map(|e| format!("{}->{}", e.from_match_id, e.to_match_id))
            .collect();
        edge_parts.sort();

        let blob = format!(
            "{}#{}#{}:{}:{}:{}:{}:{}:{}:{}",
            match_parts.join("|"),
            edge_parts.join("|"),
            config.match_width,
            config.match_height,
            config.column_width,
            config.row_height,
            config.bracket_alignment.as_str(),
            config.top_offset,
            config.left_offset,
            kind.as_str(),
        );

        base36(djb2(&blob))
    }

    /// Look up a cached layout. Expired entries count as misses and are
    /// removed.
    pub fn get(&mut self, key: &str) -> Option<&BracketLayout> {
        match self.entries.get(key) {
            None => {
                self.misses += 1;
                return None;
            }
            Some(entry) if entry.inserted_at.elapsed() >= self.ttl => {
                self.entries.remove(key);
                self.misses += 1;
                return None;
            }
            Some(_) => {}
        }

        self.hits += 1;
        let entry = self.entries.get_mut(key)?;
        entry.hit_count += 1;
        Some(&entry.layout)
    }

    /// Store a layout, evicting the least-used entry at capacity.
    pub fn insert(&mut self, key: String, layout: BracketLayout) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let victim = self
                .entries
                .iter()
                .min_by(|(ka, ea), (kb, eb)| {
                    ea.hit_count.cmp(&eb.hit_count).then_with(|| ka.cmp(kb))
                })
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                self.entries.remove(&victim);
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                layout,
                inserted_at: Instant::now(),
                hit_count: 0,
            },
        );
    }

    /// Drop cached layouts affected by the given matches.
    ///
    /// Keys are content hashes, so individual entries cannot be located by
    /// match id; any non-empty invalidation set clears the whole cache.
    pub fn invalidate<S: AsRef<str>>(&mut self, match_ids: &[S]) {
        if !match_ids.is_empty() {
            self.entries.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            hit_rate: if total == 0 {
                0.0
            } else {
                self.hits as f64 / total as f64
            },
        }
    }
}

/// Cache-checked elimination layout.
pub fn compute_layout_cached(
    cache: &mut LayoutCache,
    matches: &[Match],
    edges: &[Edge],
    kind: BracketKind,
    config: &LayoutConfig,
    profile: Option<&FormatProfile>,
) -> BracketLayout {
    let key = LayoutCache::key(matches, edges, kind, config);
    if let Some(hit) = cache.get(&key) {
        return hit.clone();
    }

    let layout = compute_layout(matches, edges, kind, config, profile);
    cache.insert(key, layout.clone());
    layout
}

fn score_part(opponent: &Option<Opponent>) -> String {
    match opponent.as_ref().and_then(|o| o.score) {
        Some(score) => score.to_string(),
        None => "-".to_string(),
    }
}

fn djb2(input: &str) -> u32 {
    let mut hash: u32 = 5381;
    for byte in input.bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u32::from(byte));
    }
    hash
}

fn base36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::{Edge, Match, ToSlot};

    fn fixture() -> (Vec<Match>, Vec<Edge>, LayoutConfig) {
        let matches = vec![
            Match::new("m1", "g-winners-bracket", "g-winners-bracket-round-1", 1),
            Match::new("m2", "g-winners-bracket", "g-winners-bracket-round-1", 2),
            Match::new("m3", "g-winners-bracket", "g-winners-bracket-round-2", 1),
        ];
        let edges = vec![
            Edge::winner("m1", "m3", ToSlot::Slot1),
            Edge::winner("m2", "m3", ToSlot::Slot2),
        ];
        (matches, edges, LayoutConfig::default())
    }

    #[test]
    fn test_miss_then_hit() {
        let (matches, edges, config) = fixture();
        let mut cache = LayoutCache::new();

        let first = compute_layout_cached(
            &mut cache,
            &matches,
            &edges,
            BracketKind::SingleElimination,
            &config,
            None,
        );
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);

        let second = compute_layout_cached(
            &mut cache,
            &matches,
            &edges,
            BracketKind::SingleElimination,
            &config,
            None,
        );
        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().hit_rate, 0.5);
    }

    #[test]
    fn test_key_ignores_input_order() {
        let (mut matches, mut edges, config) = fixture();
        let a = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        matches.reverse();
        edges.reverse();
        let b = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_change_changes_key() {
        let (mut matches, edges, config) = fixture();
        let before = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        matches[0].opponent1 = Some(Opponent {
            score: Some(2),
            ..Opponent::default()
        });
        let after = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        assert_ne!(before, after);
    }

    #[test]
    fn test_config_change_changes_key() {
        let (matches, edges, mut config) = fixture();
        let before = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        config.column_width += 10.0;
        let after = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        assert_ne!(before, after);
    }

    #[test]
    fn test_invalidate_clears() {
        let (matches, edges, config) = fixture();
        let mut cache = LayoutCache::new();
        compute_layout_cached(
            &mut cache,
            &matches,
            &edges,
            BracketKind::SingleElimination,
            &config,
            None,
        );
        assert_eq!(cache.stats().size, 1);

        cache.invalidate::<&str>(&[]);
        assert_eq!(cache.stats().size, 1);

        cache.invalidate(&["m1"]);
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_ttl_expiry_is_a_miss() {
        let (matches, edges, config) = fixture();
        let mut cache = LayoutCache::with_limits(DEFAULT_MAX_ENTRIES, Duration::ZERO);

        compute_layout_cached(
            &mut cache,
            &matches,
            &edges,
            BracketKind::SingleElimination,
            &config,
            None,
        );
        let key = LayoutCache::key(&matches, &edges, BracketKind::SingleElimination, &config);
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_eviction_drops_least_used() {
        let mut cache = LayoutCache::with_limits(2, DEFAULT_TTL);
        cache.insert("a".to_string(), BracketLayout::empty());
        cache.insert("b".to_string(), BracketLayout::empty());
        // "a" gets a hit; "b" stays cold.
        assert!(cache.get("a").is_some());

        cache.insert("c".to_string(), BracketLayout::empty());
        assert_eq!(cache.stats().size, 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_djb2_base36_stability() {
        // Known value, guards accidental changes to the key scheme.
        assert_eq!(djb2(""), 5381);
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        let key = base36(djb2("abc"));
        assert_eq!(key, base36(djb2("abc")));
    }
}
