//! The fixed 4×16 seed grid.
//!
//! Regions are created once, in canonical order, and only their slots ever change. A slot
//! holds a starch id (a weak reference into the pool) or nothing. The slot array length is
//! part of the type, so a region can never gain or lose slots.

use crate::errors::SeedingError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical region names, in bracket order.
pub const REGION_NAMES: [&str; REGION_COUNT] = ["Grain", "Tuber", "Noodle", "Dough"];
pub const REGION_COUNT: usize = 4;
pub const SEEDS_PER_REGION: usize = 16;
pub const TOTAL_SLOTS: usize = REGION_COUNT * SEEDS_PER_REGION;

/// Address of one seed slot: region index into [`REGION_NAMES`] and 0-based seed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub region: usize,
    pub seed_index: usize,
}

impl SlotRef {
    /// Slot by canonical region name (exact match) and 0-based seed index.
    pub fn named(region: &str, seed_index: usize) -> Option<Self> {
        let region = REGION_NAMES.iter().position(|n| *n == region)?;
        (seed_index < SEEDS_PER_REGION).then_some(SlotRef { region, seed_index })
    }

    /// Slot from user input: region name matched case-insensitively, 1-based seed number.
    pub fn parse(region: &str, seed_number: usize) -> Result<Self, SeedingError> {
        let region_idx = region_index(region)
            .ok_or_else(|| SeedingError::UnknownRegion(region.to_string()))?;
        if !(1..=SEEDS_PER_REGION).contains(&seed_number) {
            return Err(SeedingError::SeedOutOfRange(seed_number));
        }
        Ok(SlotRef {
            region: region_idx,
            seed_index: seed_number - 1,
        })
    }

    pub fn region_name(&self) -> &'static str {
        REGION_NAMES[self.region]
    }

    /// Tournament seed number (1-based).
    pub fn seed_number(&self) -> usize {
        self.seed_index + 1
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.region_name(), self.seed_number())
    }
}

/// Case-insensitive lookup of a canonical region name.
pub fn region_index(name: &str) -> Option<usize> {
    let name = name.trim();
    REGION_NAMES.iter().position(|n| n.eq_ignore_ascii_case(name))
}

/// One region: a canonical name and exactly 16 slots, index `i` holding seed `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub seeds: [Option<String>; SEEDS_PER_REGION],
}

impl Region {
    pub fn empty(name: &str) -> Self {
        Region {
            name: name.to_string(),
            seeds: Default::default(),
        }
    }

    /// Starch id at a 0-based seed index.
    pub fn at(&self, seed_index: usize) -> Option<&str> {
        self.seeds.get(seed_index).and_then(|s| s.as_deref())
    }

    pub fn filled_count(&self) -> usize {
        self.seeds.iter().filter(|s| s.is_some()).count()
    }
}

/// All four regions in canonical order.
///
/// Serialized as a plain array of regions. Deserialization accepts any order but requires
/// each canonical region exactly once with 16 slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Region>", into = "Vec<Region>")]
pub struct SeedGrid {
    regions: [Region; REGION_COUNT],
}

impl Default for SeedGrid {
    fn default() -> Self {
        SeedGrid::empty()
    }
}

impl TryFrom<Vec<Region>> for SeedGrid {
    type Error = SeedingError;

    fn try_from(regions: Vec<Region>) -> Result<Self, Self::Error> {
        if regions.len() != REGION_COUNT {
            return Err(SeedingError::InvalidImport(format!(
                "expected {} regions, found {}",
                REGION_COUNT,
                regions.len()
            )));
        }
        let mut grid = SeedGrid::empty();
        let mut seen = [false; REGION_COUNT];
        for region in regions {
            let idx = REGION_NAMES
                .iter()
                .position(|n| *n == region.name)
                .ok_or_else(|| SeedingError::UnknownRegion(region.name.clone()))?;
            if seen[idx] {
                return Err(SeedingError::InvalidImport(format!(
                    "region {} appears twice",
                    region.name
                )));
            }
            seen[idx] = true;
            grid.regions[idx] = region;
        }
        Ok(grid)
    }
}

impl From<SeedGrid> for Vec<Region> {
    fn from(grid: SeedGrid) -> Self {
        grid.regions.into()
    }
}

impl SeedGrid {
    /// Four canonical regions with every slot empty.
    pub fn empty() -> Self {
        SeedGrid {
            regions: REGION_NAMES.map(Region::empty),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn get(&self, slot: SlotRef) -> Option<&str> {
        self.regions[slot.region].at(slot.seed_index)
    }

    pub fn is_empty_slot(&self, slot: SlotRef) -> bool {
        self.get(slot).is_none()
    }

    pub(crate) fn set(&mut self, slot: SlotRef, value: Option<String>) {
        self.regions[slot.region].seeds[slot.seed_index] = value;
    }

    /// Every slot address, in region order then seed order.
    pub fn slots() -> impl Iterator<Item = SlotRef> {
        (0..REGION_COUNT).flat_map(|region| {
            (0..SEEDS_PER_REGION).map(move |seed_index| SlotRef { region, seed_index })
        })
    }

    /// Occupied slot values in region order then seed order.
    pub fn assigned_in_order(&self) -> Vec<&str> {
        self.regions
            .iter()
            .flat_map(|r| r.seeds.iter().filter_map(|s| s.as_deref()))
            .collect()
    }

    /// Ids currently occupying some slot, recomputed from the slots on every call.
    pub fn assigned_ids(&self) -> HashSet<&str> {
        self.assigned_in_order().into_iter().collect()
    }

    /// Where `id` currently sits, if anywhere.
    pub fn position_of(&self, id: &str) -> Option<SlotRef> {
        SeedGrid::slots().find(|slot| self.get(*slot) == Some(id))
    }

    pub fn filled_count(&self) -> usize {
        self.regions.iter().map(Region::filled_count).sum()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == TOTAL_SLOTS
    }

    /// Empty every slot holding `id`. Returns how many slots were cleared.
    pub fn clear_item(&mut self, id: &str) -> usize {
        let mut cleared = 0;
        for region in self.regions.iter_mut() {
            for seed in region.seeds.iter_mut() {
                if seed.as_deref() == Some(id) {
                    *seed = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Repair a grid that came from outside (snapshot or import): clear slots whose id is
    /// not known and any repeat placement of an id after its first occurrence.
    /// Returns the number of slots cleared.
    pub fn retain_known<F>(&mut self, is_known: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut cleared = 0;
        for region in self.regions.iter_mut() {
            for seed in region.seeds.iter_mut() {
                let keep = match seed.as_deref() {
                    None => true,
                    Some(id) => is_known(id) && seen.insert(id.to_string()),
                };
                if !keep {
                    *seed = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_shape() {
        let grid = SeedGrid::empty();
        assert_eq!(grid.regions().len(), 4);
        assert!(grid.regions().iter().all(|r| r.seeds.len() == 16));
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(SeedGrid::slots().count(), TOTAL_SLOTS);
        let names: Vec<_> = grid.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, REGION_NAMES);
    }

    #[test]
    fn slot_parse_uses_seed_numbers() {
        let slot = SlotRef::parse("noodle", 16).unwrap();
        assert_eq!(slot, SlotRef { region: 2, seed_index: 15 });
        assert_eq!(slot.to_string(), "Noodle #16");
        assert!(matches!(SlotRef::parse("Rice", 1), Err(SeedingError::UnknownRegion(_))));
        assert!(matches!(SlotRef::parse("Grain", 0), Err(SeedingError::SeedOutOfRange(0))));
        assert!(matches!(SlotRef::parse("Grain", 17), Err(SeedingError::SeedOutOfRange(17))));
        assert!(SlotRef::named("grain", 0).is_none());
        assert!(SlotRef::named("Grain", 16).is_none());
    }

    #[test]
    fn deserialize_rejects_wrong_shapes() {
        let mut regions: Vec<Region> = SeedGrid::empty().into();
        regions.reverse();
        let json = serde_json::to_string(&regions).unwrap();
        let grid: SeedGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid.regions()[0].name, "Grain");

        regions.pop();
        let short = serde_json::to_string(&regions).unwrap();
        assert!(serde_json::from_str::<SeedGrid>(&short).is_err());

        let fifteen = r#"[{"name":"Grain","seeds":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null]}]"#;
        assert!(serde_json::from_str::<SeedGrid>(fifteen).is_err());
    }

    #[test]
    fn retain_known_clears_dangling_and_duplicates() {
        let mut grid = SeedGrid::empty();
        grid.set(SlotRef::named("Grain", 0).unwrap(), Some("1".into()));
        grid.set(SlotRef::named("Tuber", 0).unwrap(), Some("1".into()));
        grid.set(SlotRef::named("Dough", 5).unwrap(), Some("ghost".into()));
        grid.set(SlotRef::named("Dough", 6).unwrap(), Some("2".into()));
        let cleared = grid.retain_known(|id| id != "ghost");
        assert_eq!(cleared, 2);
        assert_eq!(grid.assigned_in_order(), vec!["1", "2"]);
        assert_eq!(grid.position_of("1"), SlotRef::named("Grain", 0));
    }
}
