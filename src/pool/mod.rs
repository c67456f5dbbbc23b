//! # Starch Pool
//!
//! The pool is the ordered list of starches the user can seed into the bracket. Each
//! starch carries a stable string id, a display name, an emoji and an optional image
//! (usually an inline data URI) that overrides the emoji when present.
//!
//! Ids are assigned as `max(numeric ids) + 1` and are never reused while the starch with
//! the current maximum id exists. Imported ids count by their leading digits, so `"12abc"`
//! counts as 12 and `"custom"` as 0.
//!
//! The pool knows nothing about the bracket: deleting a starch here does not clear its
//! seed slot. Use [`crate::state::SeedingState::delete_starch`], which performs the
//! cascade.

mod defaults;

pub use defaults::{default_starches, COMMON_EMOJIS, DEFAULT_EMOJI};

use crate::errors::SeedingError;
use serde::{Deserialize, Serialize};

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

/// A selectable pool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starch {
    pub id: String,
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Starch {
    pub fn new(id: impl Into<String>, name: &str, emoji: &str) -> Self {
        Starch {
            id: id.into(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: &str) -> Self {
        self.image_url = normalize_image(Some(image_url.to_string()));
        self
    }

    /// Glyph used by text views: the emoji, or a marker when an image replaces it.
    pub fn glyph(&self) -> &str {
        if self.image_url.is_some() {
            "🖼"
        } else {
            &self.emoji
        }
    }
}

/// Validated starch fields without an id, as produced by the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarchDraft {
    name: String,
    emoji: String,
    image_url: Option<String>,
}

impl StarchDraft {
    /// Build a draft, trimming the name and rejecting it when nothing is left.
    /// A blank emoji falls back to [`DEFAULT_EMOJI`]; a blank image URL means no image.
    pub fn new(name: &str, emoji: Option<&str>, image_url: Option<String>) -> Result<Self, SeedingError> {
        let name = crate::validation::validate_starch_name(name)?;
        let emoji = match emoji.map(str::trim) {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => default_emoji(),
        };
        Ok(StarchDraft {
            name,
            emoji,
            image_url: normalize_image(image_url),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn into_starch(self, id: String) -> Starch {
        Starch {
            id,
            name: self.name,
            emoji: self.emoji,
            image_url: self.image_url,
        }
    }
}

fn normalize_image(image_url: Option<String>) -> Option<String> {
    image_url.filter(|u| !u.trim().is_empty())
}

/// Ordered starch collection keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarchPool {
    starches: Vec<Starch>,
}

impl StarchPool {
    pub fn new(starches: Vec<Starch>) -> Self {
        StarchPool { starches }
    }

    /// The compiled-in catalogue.
    pub fn with_defaults() -> Self {
        StarchPool::new(default_starches())
    }

    pub fn len(&self) -> usize {
        self.starches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Starch> {
        self.starches.iter()
    }

    pub fn as_slice(&self) -> &[Starch] {
        &self.starches
    }

    pub fn get(&self, id: &str) -> Option<&Starch> {
        self.starches.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Next free id: one past the largest numeric id in the pool.
    pub fn next_id(&self) -> String {
        let max = self
            .starches
            .iter()
            .map(|s| id_number(&s.id))
            .max()
            .unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return next.to_string();
        }
        // Saturated: take the smallest free id. At most len + 1 probes.
        let mut n: u128 = 1;
        while self.contains(&n.to_string()) {
            n += 1;
        }
        n.to_string()
    }

    /// Append a new starch and return its id. Duplicate names are allowed.
    pub fn add(&mut self, draft: StarchDraft) -> String {
        let id = self.next_id();
        self.starches.push(draft.into_starch(id.clone()));
        id
    }

    /// Replace the fields of the starch with `id`. Unknown ids are ignored.
    pub fn edit(&mut self, id: &str, draft: StarchDraft) {
        if let Some(slot) = self.starches.iter_mut().find(|s| s.id == id) {
            *slot = draft.into_starch(id.to_string());
        }
    }

    /// Drop the starch with `id` from the pool, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Starch> {
        let pos = self.starches.iter().position(|s| s.id == id)?;
        Some(self.starches.remove(pos))
    }

    /// Case-insensitive substring match on names, in pool order. An empty query matches all.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Starch> + 'a {
        let needle = query.trim().to_lowercase();
        self.starches
            .iter()
            .filter(move |s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
    }
}

/// Value of the id's leading digits (after whitespace and an optional `+`), 0 when
/// there are none. Digit runs too long for `u128` saturate.
fn id_number(id: &str) -> u128 {
    let trimmed = id.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match &trimmed[..end] {
        "" => 0,
        digits => digits.parse().unwrap_or(u128::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> StarchDraft {
        StarchDraft::new(name, None, None).unwrap()
    }

    #[test]
    fn add_assigns_max_plus_one() {
        let mut pool = StarchPool::new(vec![
            Starch::new("3", "Bagel", "🥯"),
            Starch::new("10", "Naan", "🫓"),
            Starch::new("custom", "Odd", "🍞"),
        ]);
        let id = pool.add(draft("Gnocchi"));
        assert_eq!(id, "11");
        assert_eq!(pool.get("11").unwrap().name, "Gnocchi");
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn next_id_counts_leading_digits() {
        let pool = StarchPool::new(vec![
            Starch::new("12abc", "Pita", "🫓"),
            Starch::new(" 7", "Roti", "🫓"),
            Starch::new("-40", "Arepa", "🫓"),
        ]);
        assert_eq!(pool.next_id(), "13");
    }

    #[test]
    fn next_id_past_u64_max_does_not_wrap() {
        let mut pool = StarchPool::new(vec![Starch::new(u64::MAX.to_string(), "Huge", "🍞")]);
        let id = pool.add(draft("Bigger"));
        assert_eq!(id, "18446744073709551616");
        assert_eq!(pool.next_id(), "18446744073709551617");
    }

    #[test]
    fn saturated_ids_fall_back_to_smallest_free() {
        let huge = "9".repeat(60);
        let mut pool = StarchPool::new(vec![
            Starch::new(huge.clone(), "Endless", "🍞"),
            Starch::new("1", "Bagel", "🥯"),
        ]);
        let id = pool.add(draft("Gnocchi"));
        assert_eq!(id, "2");
        assert_eq!(pool.add(draft("Spaetzle")), "3");
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn next_id_on_empty_pool_is_one() {
        assert_eq!(StarchPool::default().next_id(), "1");
    }

    #[test]
    fn draft_trims_and_defaults() {
        let d = StarchDraft::new("  Pho  ", Some("  "), Some(String::new())).unwrap();
        assert_eq!(d.name(), "Pho");
        let s = d.into_starch("1".into());
        assert_eq!(s.emoji, DEFAULT_EMOJI);
        assert!(s.image_url.is_none());
        assert!(StarchDraft::new("   ", None, None).is_err());
    }

    #[test]
    fn edit_keeps_id_and_ignores_unknown() {
        let mut pool = StarchPool::with_defaults();
        pool.edit("1", StarchDraft::new("Everything Bagel", Some("🥯"), None).unwrap());
        assert_eq!(pool.get("1").unwrap().name, "Everything Bagel");
        let before = pool.clone();
        pool.edit("999", draft("Ghost"));
        assert_eq!(pool, before);
    }

    #[test]
    fn search_is_case_insensitive() {
        let pool = StarchPool::with_defaults();
        let hits: Vec<_> = pool.search("POTATO").map(|s| s.name.as_str()).collect();
        assert!(hits.contains(&"Baked Potato"));
        assert!(hits.iter().all(|n| n.to_lowercase().contains("potato")));
        assert_eq!(pool.search("").count(), pool.len());
    }

    #[test]
    fn image_overrides_glyph_and_serializes_camel_case() {
        let s = Starch::new("1", "Bagel", "🥯").with_image("data:image/png;base64,AA");
        assert_eq!(s.glyph(), "🖼");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"imageUrl\""));
        let plain = serde_json::to_string(&Starch::new("2", "Naan", "🫓")).unwrap();
        assert!(!plain.contains("imageUrl"));
    }
}
