//! Test utilities & fixtures.
//! Static fixtures live under `tests/fixtures`.

use starchseed::bracket::SlotRef;
use starchseed::pool::{Starch, StarchPool};
use std::path::{Path, PathBuf};

/// Return the path to the static fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Contents of a fixture file.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_root().join(name)).expect("fixture")
}

/// Pool with ids "1".."n" named `Starch <id>`.
#[allow(dead_code)]
pub fn numbered_pool(n: usize) -> StarchPool {
    StarchPool::new(
        (1..=n)
            .map(|i| Starch::new(i.to_string(), &format!("Starch {}", i), "🍞"))
            .collect(),
    )
}

/// Slot by canonical region name and 0-based seed index.
#[allow(dead_code)]
pub fn slot(region: &str, seed_index: usize) -> SlotRef {
    SlotRef::named(region, seed_index).expect("valid slot")
}
