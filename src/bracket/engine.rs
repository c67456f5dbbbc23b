//! Seed assignment rules.
//!
//! Every operation here is total: callers hand in slots built through [`SlotRef`] and ids
//! they got from the pool, and the grid is rewritten in one step. Since the grid is borrowed
//! mutably for the whole call, no reader can observe a half-applied move.
//!
//! Invariant after every call: an id occupies at most one slot in the grid.

use super::grid::{SeedGrid, SlotRef, TOTAL_SLOTS};
use crate::pool::{Starch, StarchPool};
use log::debug;
use rand::Rng;

/// Pool entries not currently seeded, in pool order.
pub fn unassigned<'a>(pool: &'a StarchPool, grid: &SeedGrid) -> Vec<&'a Starch> {
    let assigned = grid.assigned_ids();
    pool.iter().filter(|s| !assigned.contains(s.id.as_str())).collect()
}

/// Place `id` at `slot`, first clearing any slot that already held it (move semantics).
/// Whatever was at `slot` before is overwritten and becomes unassigned.
pub fn assign(grid: &mut SeedGrid, slot: SlotRef, id: &str) {
    let moved_from = grid.position_of(id);
    grid.clear_item(id);
    grid.set(slot, Some(id.to_string()));
    debug!("assign {} -> {} (from {:?})", id, slot, moved_from);
}

/// Empty one slot. Already-empty slots are left as they are.
pub fn remove(grid: &mut SeedGrid, slot: SlotRef) {
    grid.set(slot, None);
}

/// Fill empty slots with unassigned starches, first come first served, walking regions
/// in order and seeds 1 through 16 within each. Occupied slots are never touched.
/// Returns the number of starches placed.
pub fn auto_seed(pool: &StarchPool, grid: &mut SeedGrid) -> usize {
    let mut queue = unassigned(pool, grid)
        .into_iter()
        .map(|s| s.id.clone())
        .collect::<Vec<_>>()
        .into_iter();
    let mut next = grid.clone();
    let mut placed = 0;
    for slot in SeedGrid::slots() {
        if !next.is_empty_slot(slot) {
            continue;
        }
        match queue.next() {
            Some(id) => {
                next.set(slot, Some(id));
                placed += 1;
            }
            None => break,
        }
    }
    *grid = next;
    placed
}

/// Outcome of a shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Starches now seeded.
    pub placed: usize,
    /// Unassigned starches that did not fit in the 64 slots and were left out.
    pub left_out: usize,
}

/// Candidate list for a shuffle: seeded ids in grid order, then unassigned ids in pool
/// order, capped at the number of slots. The overflow is counted, not placed.
pub fn shuffle_candidates(pool: &StarchPool, grid: &SeedGrid) -> (Vec<String>, usize) {
    let mut candidates: Vec<String> = grid
        .assigned_in_order()
        .into_iter()
        .map(str::to_string)
        .collect();
    candidates.extend(unassigned(pool, grid).into_iter().map(|s| s.id.clone()));
    let left_out = candidates.len().saturating_sub(TOTAL_SLOTS);
    candidates.truncate(TOTAL_SLOTS);
    (candidates, left_out)
}

/// Re-deal seeded and unassigned starches across all 64 slots in uniformly random order.
pub fn shuffle_seed(pool: &StarchPool, grid: &mut SeedGrid) -> ShuffleReport {
    shuffle_seed_with(pool, grid, &mut rand::thread_rng())
}

/// [`shuffle_seed`] with a caller-supplied RNG.
pub fn shuffle_seed_with<R: Rng>(
    pool: &StarchPool,
    grid: &mut SeedGrid,
    rng: &mut R,
) -> ShuffleReport {
    let (mut candidates, left_out) = shuffle_candidates(pool, grid);
    // Fisher-Yates, last index down to 1.
    for i in (1..candidates.len()).rev() {
        let j = rng.gen_range(0..=i);
        candidates.swap(i, j);
    }
    let placed = candidates.len();
    let mut dealt = candidates.into_iter();
    let mut next = SeedGrid::empty();
    for slot in SeedGrid::slots() {
        next.set(slot, dealt.next());
    }
    *grid = next;
    ShuffleReport { placed, left_out }
}

/// Empty every slot in every region.
pub fn clear_all(grid: &mut SeedGrid) {
    *grid = SeedGrid::empty();
}
