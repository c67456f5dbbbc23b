//! Plain-text views of the seeding state.

use crate::bracket::{region_matchups, SeedEntry, Selection, SlotRef, TOTAL_SLOTS};
use crate::export::ExportSummary;
use crate::pool::{Starch, StarchPool, COMMON_EMOJIS};
use crate::state::{SeedingState, Tab};

/// `[Starch Pool (66)] | Bracket Seeding (12/64) | Export`, active tab bracketed.
pub fn tab_bar(state: &SeedingState) -> String {
    let labels = [
        (Tab::Pool, format!("Starch Pool ({})", state.pool().len())),
        (
            Tab::Seeding,
            format!("Bracket Seeding ({}/{})", state.filled_count(), TOTAL_SLOTS),
        ),
        (Tab::Export, "Export".to_string()),
    ];
    labels
        .iter()
        .map(|(tab, label)| {
            if *tab == state.tab() {
                format!("[{}]", label)
            } else {
                label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn starch_line(starch: &Starch) -> String {
    format!("{:>4}. {} {}", starch.id, starch.glyph(), starch.name)
}

/// The pool view: every starch (or those matching `query`) with where it is seeded.
pub fn pool_list(state: &SeedingState, query: Option<&str>) -> String {
    let pool = state.pool();
    let matches: Vec<&Starch> = match query {
        Some(q) => pool.search(q).collect(),
        None => pool.iter().collect(),
    };
    let mut out = match query {
        Some(q) => format!("Starches matching '{}' ({} found):\n", q, matches.len()),
        None => format!("Starch Pool ({}):\n", pool.len()),
    };
    if matches.is_empty() {
        out.push_str("  (none)\n");
    }
    for starch in matches {
        let placement = match state.grid().position_of(&starch.id) {
            Some(slot) => format!("  [{}]", slot),
            None => String::new(),
        };
        out.push_str(&format!("{}{}\n", starch_line(starch), placement));
    }
    out
}

/// Unassigned starches, as shown next to the bracket.
pub fn unassigned_sidebar(state: &SeedingState, query: Option<&str>, selection: &Selection) -> String {
    let all = state.unassigned();
    let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
    let shown: Vec<&&Starch> = all
        .iter()
        .filter(|s| match &needle {
            Some(q) => s.name.to_lowercase().contains(q),
            None => true,
        })
        .collect();
    let mut out = format!("Unassigned ({}):\n", all.len());
    if all.is_empty() {
        out.push_str("  All starches have been seeded!\n");
        return out;
    }
    if shown.is_empty() {
        out.push_str("  No matches\n");
    }
    for starch in shown {
        let marker = match selection {
            Selection::ItemSelected(id) if *id == starch.id => ">",
            _ => " ",
        };
        out.push_str(&format!("{}{}\n", marker, starch_line(starch)));
    }
    out
}

fn seed_label(entry: &SeedEntry<'_>, region: usize, pool: &StarchPool, pending: Option<SlotRef>) -> String {
    let slot = SlotRef {
        region,
        seed_index: entry.seed - 1,
    };
    let pending_mark = if pending == Some(slot) { "*" } else { "" };
    match entry.starch(pool) {
        Some(s) => format!("#{} {} {}{}", entry.seed, s.glyph(), s.name, pending_mark),
        None => format!("#{} (empty){}", entry.seed, pending_mark),
    }
}

/// One region: header with fill count, then its eight first-round games.
pub fn region_card(state: &SeedingState, region_index: usize, selection: &Selection) -> String {
    let Some(region) = state.grid().region(region_index) else {
        return String::new();
    };
    let pending = match selection {
        Selection::SlotPending(slot) => Some(*slot),
        _ => None,
    };
    let pool = state.pool();
    let mut out = format!(
        "{} Region {}/{}\n",
        region.name,
        region.filled_count(),
        region.seeds.len()
    );
    for matchup in region_matchups(region) {
        out.push_str(&format!(
            "  Game {}: {} vs {}\n",
            matchup.game,
            seed_label(&matchup.top, region_index, pool, pending),
            seed_label(&matchup.bottom, region_index, pool, pending),
        ));
    }
    out
}

/// Bracket view: every region card followed by the sidebar.
pub fn seeding_view(state: &SeedingState, selection: &Selection, query: Option<&str>) -> String {
    let mut out = String::new();
    for index in 0..state.grid().regions().len() {
        out.push_str(&region_card(state, index, selection));
        out.push('\n');
    }
    out.push_str(&unassigned_sidebar(state, query, selection));
    out.push_str(&selection_line(state, selection));
    out
}

/// Hint describing the current selection.
pub fn selection_line(state: &SeedingState, selection: &Selection) -> String {
    match selection {
        Selection::Idle => String::new(),
        Selection::ItemSelected(id) => {
            let name = state.pool().get(id).map(|s| s.name.as_str()).unwrap_or(id.as_str());
            format!("Selected {}: SLOT <region> <seed> to place it, CANCEL to deselect.\n", name)
        }
        Selection::SlotPending(slot) => format!(
            "Choosing a starch for {}: PICK <id> to place it, CANCEL to stop.\n",
            slot
        ),
    }
}

pub fn export_view(state: &SeedingState) -> String {
    let summary = ExportSummary::of(state);
    let mut out = format!("Export \"{}\"\n", state.tournament_name());
    out.push_str(&format!("  Total Starches: {}\n", summary.total_starches));
    out.push_str(&format!(
        "  Slots Filled:   {}/{}\n",
        summary.filled_slots, summary.total_slots
    ));
    out.push_str(&format!("  Regions:        {}\n", summary.regions));
    out.push_str(&format!("  Status:         {}\n", summary.status()));
    out.push_str("EXPORT full [path] | EXPORT matchups [path] | IMPORT <path>\n");
    out
}

/// Current tab's view under the tab bar.
pub fn current_view(state: &SeedingState, selection: &Selection) -> String {
    let body = match state.tab() {
        Tab::Pool => pool_list(state, None),
        Tab::Seeding => seeding_view(state, selection, None),
        Tab::Export => export_view(state),
    };
    format!("{}\n{}\n{}", state.tournament_name(), tab_bar(state), body)
}

pub fn status_line(state: &SeedingState) -> String {
    format!(
        "{}: {} starches, {}/{} slots filled, {} unassigned\n",
        state.tournament_name(),
        state.pool().len(),
        state.filled_count(),
        TOTAL_SLOTS,
        state.unassigned().len()
    )
}

pub fn help_text() -> String {
    let mut out = String::from(
        "Commands:\n\
         \x20 TAB <pool|seeding|export>   switch view      SHOW        redraw view\n\
         \x20 POOL [search]               list starches    STATUS      counts\n\
         \x20 ADD <name> [| emoji] [| image]              EDIT <id> <name> [| emoji] [| image|-]\n\
         \x20 DELETE <id> YES             delete starch\n\
         \x20 PICK <id>                   select a starch  SLOT <region> <seed>  place/remove\n\
         \x20 DROP <id> <region> <seed>   place on empty   CANCEL      clear selection\n\
         \x20 ASSIGN <id> <region> <seed> place/overwrite REMOVE <region> <seed>  empty a slot\n\
         \x20 AUTO                        fill empty slots SHUFFLE     random seeding\n\
         \x20 CLEAR YES                   empty the grid   RESET YES   restore defaults\n\
         \x20 NAME <tournament name>      rename           EXPORT [full|matchups] [path]\n\
         \x20 IMPORT <path>               load a bracket   QUIT\n",
    );
    out.push_str("Emoji ideas: ");
    out.push_str(&COMMON_EMOJIS.join(" "));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::SlotRef;

    #[test]
    fn tab_bar_shows_counts_and_active_tab() {
        let mut state = SeedingState::default();
        state.assign(SlotRef::named("Grain", 0).unwrap(), "1");
        assert_eq!(
            tab_bar(&state),
            "[Starch Pool (66)] | Bracket Seeding (1/64) | Export"
        );
        state.set_tab(Tab::Export);
        assert!(tab_bar(&state).ends_with("| [Export]"));
    }

    #[test]
    fn region_card_lists_games_in_order() {
        let mut state = SeedingState::default();
        state.assign(SlotRef::named("Grain", 0).unwrap(), "1");
        let card = region_card(&state, 0, &Selection::Idle);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "Grain Region 1/16");
        assert_eq!(lines[1], "  Game 1: #1 🥯 Bagel vs #16 (empty)");
        assert_eq!(lines[2], "  Game 2: #8 (empty) vs #9 (empty)");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn pending_slot_is_marked() {
        let state = SeedingState::default();
        let slot = SlotRef::named("Tuber", 15).unwrap();
        let card = region_card(&state, 1, &Selection::SlotPending(slot));
        assert!(card.contains("#16 (empty)*"));
    }

    #[test]
    fn sidebar_filters_and_marks_selection() {
        let mut state = SeedingState::default();
        state.auto_seed();
        assert!(unassigned_sidebar(&state, None, &Selection::Idle).contains("(2)"));
        let state = SeedingState::default();
        let out = unassigned_sidebar(&state, Some("BAGE"), &Selection::ItemSelected("1".into()));
        assert!(out.contains(">   1. 🥯 Bagel"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn export_view_reports_status() {
        let mut state = SeedingState::default();
        assert!(export_view(&state).contains("Status:         Incomplete"));
        state.auto_seed();
        let view = export_view(&state);
        assert!(view.contains("Slots Filled:   64/64"));
        assert!(view.contains("Status:         Ready"));
    }
}
