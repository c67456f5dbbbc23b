//! # Import / Export
//!
//! Two JSON shapes leave the tool:
//!
//! - **Full config** (`<slug>-bracket.json`): the pool and every slot, round-trippable
//!   through [`parse_import`].
//! - **Matchups** (`<slug>-matchups.json`): per region, the eight first-round games with
//!   the starch names filled in. One-way, for people and the tournament app.
//!
//! ```json
//! {
//!   "name": "Starch Madness 2026",
//!   "createdAt": "2026-03-01T12:00:00.000Z",
//!   "starches": [{ "id": "1", "name": "Bagel", "emoji": "🥯" }],
//!   "regions": [{ "name": "Grain", "seeds": ["1", null, ...] }]
//! }
//! ```
//!
//! Imports must carry non-empty `starches` and `regions`; anything less is rejected as a
//! whole and the current state is left untouched.

use crate::bracket::{region_matchups, SeedEntry, SeedGrid, SEEDS_PER_REGION, TOTAL_SLOTS};
use crate::errors::SeedingError;
use crate::pool::{Starch, StarchPool};
use crate::state::SeedingState;
use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Label used for empty seeds in the matchups export.
pub const EMPTY_SEED_NAME: &str = "(empty)";

/// Which export to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Full,
    Matchups,
}

impl ExportFormat {
    fn file_suffix(self) -> &'static str {
        match self {
            ExportFormat::Full => "bracket",
            ExportFormat::Matchups => "matchups",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "bracket" | "config" => Ok(ExportFormat::Full),
            "matchups" | "readable" => Ok(ExportFormat::Matchups),
            other => Err(format!("unknown export format '{}' (full, matchups)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Full => "full",
            ExportFormat::Matchups => "matchups",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRegion {
    pub name: String,
    pub seeds: Vec<Option<String>>,
}

/// Round-trippable bracket document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    pub name: String,
    pub created_at: String,
    pub starches: Vec<Starch>,
    pub regions: Vec<ExportRegion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadableSeed {
    pub seed: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadableMatchup {
    pub game: String,
    pub top: ReadableSeed,
    pub bottom: ReadableSeed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadableRegion {
    pub name: String,
    pub matchups: Vec<ReadableMatchup>,
}

/// Human-facing matchup listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadableExport {
    pub name: String,
    pub created_at: String,
    pub regions: Vec<ReadableRegion>,
}

/// `createdAt` format: RFC 3339, UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the full export. Seeds pointing at starches no longer in the pool become null.
pub fn full_export(state: &SeedingState, now: DateTime<Utc>) -> FullExport {
    let pool = state.pool();
    FullExport {
        name: state.tournament_name().to_string(),
        created_at: format_timestamp(now),
        starches: pool.iter().cloned().collect(),
        regions: state
            .grid()
            .regions()
            .iter()
            .map(|region| ExportRegion {
                name: region.name.clone(),
                seeds: region
                    .seeds
                    .iter()
                    .map(|slot| {
                        slot.as_deref()
                            .and_then(|id| pool.get(id))
                            .map(|s| s.id.clone())
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn readable_seed(entry: &SeedEntry<'_>, pool: &StarchPool) -> ReadableSeed {
    match entry.starch(pool) {
        Some(starch) => ReadableSeed {
            seed: entry.seed,
            name: starch.name.clone(),
            emoji: Some(starch.emoji.clone()),
        },
        None => ReadableSeed {
            seed: entry.seed,
            name: EMPTY_SEED_NAME.to_string(),
            emoji: None,
        },
    }
}

/// Build the matchup listing, games in standard bracket order.
pub fn readable_export(state: &SeedingState, now: DateTime<Utc>) -> ReadableExport {
    let pool = state.pool();
    ReadableExport {
        name: state.tournament_name().to_string(),
        created_at: format_timestamp(now),
        regions: state
            .grid()
            .regions()
            .iter()
            .map(|region| ReadableRegion {
                name: region.name.clone(),
                matchups: region_matchups(region)
                    .iter()
                    .map(|m| ReadableMatchup {
                        game: m.label(),
                        top: readable_seed(&m.top, pool),
                        bottom: readable_seed(&m.bottom, pool),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Serialize either export as 2-space pretty JSON.
pub fn render_export(state: &SeedingState, format: ExportFormat, now: DateTime<Utc>) -> serde_json::Result<String> {
    match format {
        ExportFormat::Full => serde_json::to_string_pretty(&full_export(state, now)),
        ExportFormat::Matchups => serde_json::to_string_pretty(&readable_export(state, now)),
    }
}

/// Lowercase, runs of anything outside `[a-z0-9]` collapsed to `-`, no leading/trailing `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Download file name for an export of `tournament_name`.
pub fn export_filename(tournament_name: &str, format: ExportFormat) -> String {
    format!("{}-{}.json", slugify(tournament_name), format.file_suffix())
}

/// Figures shown on the export view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_starches: usize,
    pub filled_slots: usize,
    pub total_slots: usize,
    pub regions: usize,
}

impl ExportSummary {
    pub fn of(state: &SeedingState) -> Self {
        ExportSummary {
            total_starches: state.pool().len(),
            filled_slots: state.filled_count(),
            total_slots: TOTAL_SLOTS,
            regions: state.grid().regions().len(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.filled_slots == self.total_slots
    }

    pub fn status(&self) -> &'static str {
        if self.is_ready() {
            "Ready"
        } else {
            "Incomplete"
        }
    }
}

/// A validated import, ready for [`SeedingState::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedBracket {
    pub pool: StarchPool,
    pub grid: SeedGrid,
    /// Present only when the document carried a non-empty name.
    pub name: Option<String>,
}

/// Parse and validate a full-config document.
pub fn parse_import(text: &str) -> Result<ImportedBracket, SeedingError> {
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| SeedingError::UnparseableImport(e.to_string()))?;
    let Value::Object(mut doc) = value else {
        return Err(SeedingError::InvalidImport("expected a JSON object".into()));
    };

    let starches = match doc.remove("starches") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(SeedingError::InvalidImport("missing starches".into())),
    };
    let regions = match doc.remove("regions") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(SeedingError::InvalidImport("missing regions".into())),
    };

    let starches: Vec<Starch> = serde_json::from_value(Value::Array(starches))
        .map_err(|e| SeedingError::InvalidImport(format!("bad starch entry: {}", e)))?;
    let mut ids = HashSet::new();
    for starch in &starches {
        if starch.name.trim().is_empty() {
            return Err(SeedingError::InvalidImport(format!("starch {} has no name", starch.id)));
        }
        if !ids.insert(starch.id.as_str()) {
            return Err(SeedingError::InvalidImport(format!("duplicate starch id {}", starch.id)));
        }
    }
    let pool = StarchPool::new(starches);

    let mut grid: SeedGrid = serde_json::from_value(Value::Array(regions)).map_err(|e| {
        SeedingError::InvalidImport(format!(
            "regions must be Grain, Tuber, Noodle and Dough with {} seeds each ({})",
            SEEDS_PER_REGION, e
        ))
    })?;
    let cleared = grid.retain_known(|id| pool.contains(id));
    if cleared > 0 {
        warn!("Import: cleared {} slot(s) with unknown or repeated starch ids", cleared);
    }

    let name = match doc.remove("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
        _ => None,
    };

    Ok(ImportedBracket { pool, grid, name })
}
