//! # Storage Module - Snapshot Persistence
//!
//! The whole application state is persisted as one JSON document after every change and
//! read back at startup.
//!
//! ```text
//! data/
//! └── starch-madness-seeding.json   ← { starches, regions, tournamentName, tab }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starchseed::storage::Storage;
//! use starchseed::state::SeedingState;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Storage::new("./data", "starch-madness-seeding.json").await?;
//!     let snapshot = storage.load_snapshot("Starch Madness 2026").await?;
//!     let state = SeedingState::from_snapshot(snapshot, "Starch Madness 2026");
//!     storage.save_snapshot(&state.snapshot()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Fallback rules
//!
//! Loading never fails on bad content. A missing file, a file that is not JSON, or JSON
//! that is not an object gives the full default state. Otherwise each field falls back to
//! its default on its own:
//!
//! - `starches` → the built-in pool
//! - `regions` → 4 empty regions (also when the shape is not 4 canonical regions × 16)
//! - `tournamentName` → the configured default name
//! - `tab` → `pool`
//!
//! Slots that reference unknown starches, or repeat a starch already seeded earlier in the
//! grid, are cleared after loading.
//!
//! ## Writes
//!
//! Snapshots are written under an exclusive `fs2` lock to a temp file in the same
//! directory and renamed over the destination, so a crash mid-write leaves the previous
//! snapshot intact.

use crate::bracket::SeedGrid;
use crate::pool::StarchPool;
use crate::state::Tab;
use anyhow::{anyhow, Result};
use fs2::FileExt;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default snapshot file name inside the data directory.
pub const DEFAULT_STATE_FILE: &str = "starch-madness-seeding.json";

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub starches: StarchPool,
    pub regions: SeedGrid,
    pub tournament_name: String,
    pub tab: Tab,
}

impl Snapshot {
    /// Default pool, empty grid, `default_name`, pool tab.
    pub fn defaults(default_name: &str) -> Self {
        Snapshot {
            starches: StarchPool::with_defaults(),
            regions: SeedGrid::empty(),
            tournament_name: default_name.to_string(),
            tab: Tab::default(),
        }
    }

    /// Decode a stored snapshot, falling back field by field (see module docs).
    pub fn decode(raw: &str, default_name: &str) -> Self {
        let cleaned = raw.trim_start_matches('\0');
        let mut fields = match serde_json::from_str::<Value>(cleaned) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Snapshot is not a JSON object; using defaults");
                return Snapshot::defaults(default_name);
            }
            Err(e) => {
                warn!("Snapshot is not valid JSON ({}); using defaults", e);
                return Snapshot::defaults(default_name);
            }
        };

        let starches = take_field(&mut fields, "starches").unwrap_or_else(StarchPool::with_defaults);
        let mut regions = take_field(&mut fields, "regions").unwrap_or_else(SeedGrid::empty);
        let tournament_name =
            take_field(&mut fields, "tournamentName").unwrap_or_else(|| default_name.to_string());
        let tab = take_field(&mut fields, "tab").unwrap_or_default();

        let cleared = regions.retain_known(|id| starches.contains(id));
        if cleared > 0 {
            warn!(
                "Cleared {} slot(s) with unknown or repeated starch ids from snapshot",
                cleared
            );
        }

        Snapshot {
            starches,
            regions,
            tournament_name,
            tab,
        }
    }
}

/// Pull one field out of a snapshot object. Missing or null fields are `None` quietly;
/// fields of the wrong shape are `None` with a warning.
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    match fields.remove(key) {
        None | Some(Value::Null) => {
            debug!("Snapshot field '{}' missing; using default", key);
            None
        }
        Some(value) => match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Snapshot field '{}' unusable ({}); using default", key, e);
                None
            }
        },
    }
}

/// Snapshot file store.
#[derive(Debug, Clone)]
pub struct Storage {
    state_path: PathBuf,
}

impl Storage {
    /// Open (creating if needed) the data directory.
    pub async fn new(data_dir: &str, state_file: &str) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow!("Failed to create data directory {}: {}", data_dir, e))?;
        Ok(Storage {
            state_path: Path::new(data_dir).join(state_file),
        })
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Load the persisted snapshot, or defaults when there is none.
    pub async fn load_snapshot(&self, default_name: &str) -> Result<Snapshot> {
        match fs::read_to_string(&self.state_path).await {
            Ok(raw) => Ok(Snapshot::decode(&raw, default_name)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {:?}; starting from defaults", self.state_path);
                Ok(Snapshot::defaults(default_name))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!("Snapshot {:?} is not UTF-8; using defaults", self.state_path);
                Ok(Snapshot::defaults(default_name))
            }
            Err(e) => Err(anyhow!("Failed reading {:?}: {}", self.state_path, e)),
        }
    }

    /// Persist a snapshot, replacing the previous one atomically.
    pub async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| anyhow!("Failed to serialize snapshot: {}", e))?;
        Self::write_file_locked(&self.state_path, &content).await?;
        debug!("Saved snapshot to {:?}", self.state_path);
        Ok(())
    }

    /// Write content to a file under an exclusive lock via temp file + rename.
    pub async fn write_file_locked(path: &Path, content: &str) -> Result<()> {
        use std::fs::{self, File, OpenOptions};
        use std::io::Write;

        // fs2 locks are synchronous; hold the destination's lock for the whole swap.
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        lock_file.lock_exclusive()?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let base = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("state.json");
        let mut counter = 0u32;
        let tmp_path = loop {
            let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(mut tmp) => {
                    tmp.write_all(content.as_bytes())?;
                    tmp.flush()?;
                    let _ = tmp.sync_all();
                    break candidate;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    counter = counter.saturating_add(1);
                    continue;
                }
                Err(e) => return Err(anyhow!("Failed to create temp file for atomic write: {}", e)),
            }
        };

        fs::rename(&tmp_path, path)?;

        // Persist the rename (best-effort)
        if let Ok(dir_file) = File::open(dir) {
            let _ = dir_file.sync_all();
        }

        drop(lock_file);
        Ok(())
    }
}
