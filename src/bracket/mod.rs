//! # Bracket Seeding Core
//!
//! The seed grid and the rules for filling it.
//!
//! ## Components
//!
//! - [`grid`] - the fixed 4 regions × 16 seed slots and slot addressing
//! - [`engine`] - assign / remove / auto-seed / shuffle / clear over the grid
//! - [`matchups`] - first-round game pairings per region
//! - [`selection`] - the pick-then-place interaction state machine
//!
//! ```text
//! ┌─────────────────┐
//! │  Selection      │ ← turns picks and slot taps into actions
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Engine         │ ← applies seeding rules to the grid
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  SeedGrid       │ ← 64 slots holding starch ids
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use starchseed::bracket::{engine, SeedGrid, SlotRef};
//! use starchseed::pool::StarchPool;
//!
//! let pool = StarchPool::with_defaults();
//! let mut grid = SeedGrid::empty();
//! engine::assign(&mut grid, SlotRef::named("Grain", 0).unwrap(), "5");
//! engine::auto_seed(&pool, &mut grid);
//! assert!(grid.is_full());
//! ```

pub mod engine;
pub mod grid;
pub mod matchups;
pub mod selection;

pub use grid::{
    region_index, Region, SeedGrid, SlotRef, REGION_COUNT, REGION_NAMES, SEEDS_PER_REGION,
    TOTAL_SLOTS,
};
pub use matchups::{region_matchups, Matchup, SeedEntry, MATCHUP_ORDER};
pub use selection::{Selection, SelectionMachine, SlotAction};
