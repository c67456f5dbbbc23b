//! Application state container.
//!
//! [`SeedingState`] owns the starch pool, the seed grid, the tournament name and the
//! current view tab. All mutation goes through its methods; after each one, subscribers
//! registered with [`SeedingState::subscribe`] receive a [`StateChange`]. Derived values
//! (assigned ids, unassigned starches, fill counts) are recomputed from the grid on every
//! call and never stored.

use crate::bracket::engine::{self, ShuffleReport};
use crate::bracket::{SeedGrid, SlotAction, SlotRef};
use crate::logutil::escape_log;
use crate::pool::{Starch, StarchDraft, StarchPool};
use crate::storage::Snapshot;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Tournament name used when nothing else is configured.
pub const DEFAULT_TOURNAMENT_NAME: &str = "Starch Madness 2026";

/// The three views of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Pool,
    Seeding,
    Export,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pool" => Ok(Tab::Pool),
            "seeding" | "seed" => Ok(Tab::Seeding),
            "export" => Ok(Tab::Export),
            other => Err(format!("unknown tab '{}' (pool, seeding, export)", other)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tab::Pool => "pool",
            Tab::Seeding => "seeding",
            Tab::Export => "export",
        };
        f.write_str(s)
    }
}

/// What part of the state a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Pool,
    Grid,
    Name,
    Tab,
    /// Pool, grid and possibly name replaced wholesale (import or reset).
    Replaced,
}

/// Handle returned by [`SeedingState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(StateChange)>;

pub struct SeedingState {
    pool: StarchPool,
    grid: SeedGrid,
    tournament_name: String,
    tab: Tab,
    default_name: String,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for SeedingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedingState")
            .field("starches", &self.pool.len())
            .field("filled", &self.grid.filled_count())
            .field("tournament_name", &self.tournament_name)
            .field("tab", &self.tab)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for SeedingState {
    fn default() -> Self {
        SeedingState::fresh(DEFAULT_TOURNAMENT_NAME)
    }
}

impl SeedingState {
    /// Built-in pool, empty grid, `default_name` as the tournament name.
    pub fn fresh(default_name: &str) -> Self {
        SeedingState::new(
            StarchPool::with_defaults(),
            SeedGrid::empty(),
            default_name.to_string(),
            Tab::default(),
            default_name,
        )
    }

    pub fn new(
        pool: StarchPool,
        grid: SeedGrid,
        tournament_name: String,
        tab: Tab,
        default_name: &str,
    ) -> Self {
        SeedingState {
            pool,
            grid,
            tournament_name,
            tab,
            default_name: default_name.to_string(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rebuild state from a loaded snapshot.
    pub fn from_snapshot(snapshot: Snapshot, default_name: &str) -> Self {
        SeedingState::new(
            snapshot.starches,
            snapshot.regions,
            snapshot.tournament_name,
            snapshot.tab,
            default_name,
        )
    }

    /// Copy of everything that gets persisted.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            starches: self.pool.clone(),
            regions: self.grid.clone(),
            tournament_name: self.tournament_name.clone(),
            tab: self.tab,
        }
    }

    // ---- observers -------------------------------------------------------

    /// Register a callback invoked after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(StateChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: StateChange) {
        for (_, observer) in self.observers.iter_mut() {
            observer(change);
        }
    }

    // ---- reads -----------------------------------------------------------

    pub fn pool(&self) -> &StarchPool {
        &self.pool
    }

    pub fn grid(&self) -> &SeedGrid {
        &self.grid
    }

    pub fn tournament_name(&self) -> &str {
        &self.tournament_name
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn assigned_ids(&self) -> HashSet<&str> {
        self.grid.assigned_ids()
    }

    pub fn is_assigned(&self, starch_id: &str) -> bool {
        self.grid.position_of(starch_id).is_some()
    }

    pub fn unassigned(&self) -> Vec<&Starch> {
        engine::unassigned(&self.pool, &self.grid)
    }

    pub fn filled_count(&self) -> usize {
        self.grid.filled_count()
    }

    // ---- pool ------------------------------------------------------------

    pub fn add_starch(&mut self, draft: StarchDraft) -> String {
        let name = escape_log(draft.name());
        let id = self.pool.add(draft);
        info!("Added starch {} '{}'", id, name);
        self.notify(StateChange::Pool);
        id
    }

    /// Replace a starch's fields. Returns false (and changes nothing) for unknown ids.
    pub fn edit_starch(&mut self, id: &str, draft: StarchDraft) -> bool {
        if !self.pool.contains(id) {
            return false;
        }
        debug!("Editing starch {} -> '{}'", id, escape_log(draft.name()));
        self.pool.edit(id, draft);
        self.notify(StateChange::Pool);
        true
    }

    /// Delete a starch and clear every slot that referenced it.
    pub fn delete_starch(&mut self, id: &str) -> Option<Starch> {
        let removed = self.pool.remove(id)?;
        let cleared = self.grid.clear_item(id);
        info!(
            "Deleted starch {} '{}' (cleared {} slot(s))",
            id,
            escape_log(&removed.name),
            cleared
        );
        if cleared > 0 {
            self.notify(StateChange::Grid);
        }
        self.notify(StateChange::Pool);
        Some(removed)
    }

    // ---- grid ------------------------------------------------------------

    pub fn assign(&mut self, slot: SlotRef, starch_id: &str) {
        engine::assign(&mut self.grid, slot, starch_id);
        self.notify(StateChange::Grid);
    }

    pub fn remove(&mut self, slot: SlotRef) {
        engine::remove(&mut self.grid, slot);
        self.notify(StateChange::Grid);
    }

    /// Apply an action produced by the selection machine.
    pub fn apply(&mut self, action: &SlotAction) {
        match action {
            SlotAction::Assign { slot, starch_id } => self.assign(*slot, starch_id),
            SlotAction::Remove { slot } => self.remove(*slot),
        }
    }

    pub fn auto_seed(&mut self) -> usize {
        let placed = engine::auto_seed(&self.pool, &mut self.grid);
        info!("Auto-seed placed {} starch(es)", placed);
        self.notify(StateChange::Grid);
        placed
    }

    pub fn shuffle_seed(&mut self) -> ShuffleReport {
        self.shuffle_seed_with(&mut rand::thread_rng())
    }

    pub fn shuffle_seed_with<R: Rng>(&mut self, rng: &mut R) -> ShuffleReport {
        let report = engine::shuffle_seed_with(&self.pool, &mut self.grid, rng);
        info!(
            "Shuffle placed {} starch(es), {} left out",
            report.placed, report.left_out
        );
        self.notify(StateChange::Grid);
        report
    }

    pub fn clear_all(&mut self) {
        engine::clear_all(&mut self.grid);
        info!("Cleared all seed assignments");
        self.notify(StateChange::Grid);
    }

    // ---- scalars ---------------------------------------------------------

    pub fn rename(&mut self, name: String) {
        info!("Tournament renamed to '{}'", escape_log(&name));
        self.tournament_name = name;
        self.notify(StateChange::Name);
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.notify(StateChange::Tab);
        }
    }

    // ---- wholesale -------------------------------------------------------

    /// Swap in an imported pool and grid; the name is replaced only when given.
    pub fn replace(&mut self, pool: StarchPool, grid: SeedGrid, name: Option<String>) {
        self.pool = pool;
        self.grid = grid;
        if let Some(name) = name {
            self.tournament_name = name;
        }
        self.notify(StateChange::Replaced);
    }

    /// Built-in pool, empty grid, default name. The current tab is kept.
    pub fn reset(&mut self) {
        self.pool = StarchPool::with_defaults();
        self.grid = SeedGrid::empty();
        self.tournament_name = self.default_name.clone();
        info!("State reset to defaults");
        self.notify(StateChange::Replaced);
    }
}
