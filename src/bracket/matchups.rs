//! First-round pairings within a region.
//!
//! The game order is the standard 16-team single-elimination layout. Downstream tournament
//! software reads games in this exact order, so it is a constant rather than computed.

use super::grid::Region;
use crate::pool::{Starch, StarchPool};

/// Seed pairs (top, bottom) for games 1 through 8.
pub const MATCHUP_ORDER: [(usize, usize); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];

/// One side of a game: the seed number and whatever slot value it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedEntry<'a> {
    pub seed: usize,
    pub starch_id: Option<&'a str>,
}

impl SeedEntry<'_> {
    /// Resolve the slot value against the pool. Dangling ids resolve to `None`.
    pub fn starch<'p>(&self, pool: &'p StarchPool) -> Option<&'p Starch> {
        self.starch_id.and_then(|id| pool.get(id))
    }
}

/// A first-round game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup<'a> {
    /// 1-based game number within the region.
    pub game: usize,
    pub top: SeedEntry<'a>,
    pub bottom: SeedEntry<'a>,
}

impl Matchup<'_> {
    /// Label used by exports and views, e.g. `#1 vs #16`.
    pub fn label(&self) -> String {
        format!("#{} vs #{}", self.top.seed, self.bottom.seed)
    }
}

/// The eight games of a region, in [`MATCHUP_ORDER`].
pub fn region_matchups(region: &Region) -> Vec<Matchup<'_>> {
    MATCHUP_ORDER
        .iter()
        .enumerate()
        .map(|(i, &(top, bottom))| Matchup {
            game: i + 1,
            top: SeedEntry {
                seed: top,
                starch_id: region.at(top - 1),
            },
            bottom: SeedEntry {
                seed: bottom,
                starch_id: region.at(bottom - 1),
            },
        })
        .collect()
}
