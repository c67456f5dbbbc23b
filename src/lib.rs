//! # Starchseed - Bracket Seeding for Starch Madness
//!
//! Starchseed prepares a 64-entry single-elimination bracket of starchy foods: four regions
//! (Grain, Tuber, Noodle, Dough) with sixteen seeds each.
//!
//! ## Features
//!
//! - **Starch Pool**: 66 built-in starches plus add, edit, delete and search, with optional
//!   uploaded images embedded as data URIs.
//! - **Seeding**: pick-then-place or slot-then-pick placement, direct drops, auto-seed in
//!   pool order, uniform random shuffle, clear.
//! - **Matchups**: standard first-round pairings (1v16, 8v9, 5v12, 4v13, 6v11, 3v14, 7v10,
//!   2v15) per region.
//! - **Persistence**: the whole state is saved after every change and restored at start,
//!   tolerating damaged files field by field.
//! - **Import/Export**: a round-trippable full config and a readable matchup listing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starchseed::config::Config;
//! use starchseed::shell::{self, Session};
//! use starchseed::state::SeedingState;
//! use starchseed::storage::Storage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let default_name = config.tournament.default_name.clone();
//!     let storage = Storage::new(&config.storage.data_dir, &config.storage.state_file).await?;
//!     let state = SeedingState::from_snapshot(storage.load_snapshot(&default_name).await?, &default_name);
//!     let mut session = Session::new(state, config);
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     shell::run(&mut session, &storage, stdin, tokio::io::stdout()).await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - starches and the built-in pool
//! - [`bracket`] - seed grid, assignment engine, matchups, selection state machine
//! - [`state`] - state container with change subscription
//! - [`storage`] - snapshot persistence
//! - [`export`] - import and export documents
//! - [`shell`] - command parser, text views and command execution
//! - [`config`] - TOML configuration
//! - [`errors`], [`validation`], [`logutil`] - shared helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Shell / CLI   │ ← Parses commands, renders views
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  SeedingState   │ ← Pool + grid + name + tab, notifies subscribers
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Storage       │ ← Snapshot file
//! └─────────────────┘
//! ```

pub mod bracket;
pub mod config;
pub mod errors;
pub mod export;
pub mod logutil;
pub mod pool;
pub mod shell;
pub mod state;
pub mod storage;
pub mod validation;
