//! Two-step placement: pick a starch then a slot, or a slot then a starch.
//!
//! Pointer-style input (pick a starch, then click an empty slot), slot-first input (tap an
//! empty slot, then choose from the starch drawer) and drag-and-drop all reduce to the same
//! [`SlotAction`]s. The machine never touches the grid itself; the caller applies the
//! returned action through the assignment engine.
//!
//! ```text
//!   Idle ──pick unassigned──▶ ItemSelected ──empty slot──▶ assign, Idle
//!     │                          └──pick same──▶ Idle
//!     └──empty slot──▶ SlotPending ──pick any starch──▶ assign, Idle
//!   filled slot (any state) ──▶ remove, state unchanged
//! ```

use super::grid::SlotRef;

/// Current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    ItemSelected(String),
    SlotPending(SlotRef),
}

/// Grid change requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    Assign { slot: SlotRef, starch_id: String },
    Remove { slot: SlotRef },
}

/// Selection state plus its transition rules.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: Selection,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn selected_item(&self) -> Option<&str> {
        match &self.state {
            Selection::ItemSelected(id) => Some(id),
            _ => None,
        }
    }

    pub fn pending_slot(&self) -> Option<SlotRef> {
        match self.state {
            Selection::SlotPending(slot) => Some(slot),
            _ => None,
        }
    }

    /// Back to `Idle` without touching the grid.
    pub fn cancel(&mut self) {
        self.state = Selection::Idle;
    }

    /// The user picked a starch from the pool list.
    ///
    /// With a slot pending, any starch is placed there (the engine relocates seeded ones).
    /// Otherwise only unassigned starches can be selected; picking the selected one again
    /// deselects it.
    pub fn pick_item(&mut self, starch_id: &str, is_assigned: bool) -> Option<SlotAction> {
        match &self.state {
            Selection::SlotPending(slot) => {
                let action = SlotAction::Assign {
                    slot: *slot,
                    starch_id: starch_id.to_string(),
                };
                self.state = Selection::Idle;
                Some(action)
            }
            Selection::ItemSelected(current) if current == starch_id => {
                self.state = Selection::Idle;
                None
            }
            _ if is_assigned => None,
            _ => {
                self.state = Selection::ItemSelected(starch_id.to_string());
                None
            }
        }
    }

    /// The user activated a slot.
    ///
    /// Filled slots are always cleared and leave the selection alone. Empty slots receive
    /// the selected starch, or become the pending slot. Activating the pending slot again
    /// cancels it.
    pub fn activate_slot(&mut self, slot: SlotRef, occupied: bool) -> Option<SlotAction> {
        if occupied {
            return Some(SlotAction::Remove { slot });
        }
        match &self.state {
            Selection::ItemSelected(id) => {
                let action = SlotAction::Assign {
                    slot,
                    starch_id: id.clone(),
                };
                self.state = Selection::Idle;
                Some(action)
            }
            Selection::SlotPending(pending) if *pending == slot => {
                self.state = Selection::Idle;
                None
            }
            _ => {
                self.state = Selection::SlotPending(slot);
                None
            }
        }
    }

    /// A starch was dragged onto a slot. Only empty slots accept drops; any selection is
    /// cleared either way.
    pub fn drop_on_slot(&mut self, starch_id: &str, slot: SlotRef, occupied: bool) -> Option<SlotAction> {
        if occupied {
            return None;
        }
        self.state = Selection::Idle;
        Some(SlotAction::Assign {
            slot,
            starch_id: starch_id.to_string(),
        })
    }

    /// Forget a selection that points at a starch which no longer exists.
    pub fn forget_item(&mut self, starch_id: &str) {
        if self.selected_item() == Some(starch_id) {
            self.state = Selection::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(region: &str, seed_index: usize) -> SlotRef {
        SlotRef::named(region, seed_index).unwrap()
    }

    #[test]
    fn item_then_slot_assigns() {
        let mut m = SelectionMachine::new();
        assert_eq!(m.pick_item("4", false), None);
        assert_eq!(m.state(), &Selection::ItemSelected("4".into()));
        let action = m.activate_slot(slot("Grain", 2), false);
        assert_eq!(
            action,
            Some(SlotAction::Assign { slot: slot("Grain", 2), starch_id: "4".into() })
        );
        assert_eq!(m.state(), &Selection::Idle);
    }

    #[test]
    fn slot_then_item_assigns_even_if_seeded() {
        let mut m = SelectionMachine::new();
        assert_eq!(m.activate_slot(slot("Tuber", 0), false), None);
        assert_eq!(m.pending_slot(), Some(slot("Tuber", 0)));
        let action = m.pick_item("7", true);
        assert_eq!(
            action,
            Some(SlotAction::Assign { slot: slot("Tuber", 0), starch_id: "7".into() })
        );
        assert_eq!(m.state(), &Selection::Idle);
    }

    #[test]
    fn picking_same_item_toggles_off() {
        let mut m = SelectionMachine::new();
        m.pick_item("4", false);
        assert_eq!(m.pick_item("4", false), None);
        assert_eq!(m.state(), &Selection::Idle);
    }

    #[test]
    fn switching_selection_and_ignoring_seeded_items() {
        let mut m = SelectionMachine::new();
        assert_eq!(m.pick_item("1", true), None);
        assert_eq!(m.state(), &Selection::Idle);
        m.pick_item("4", false);
        m.pick_item("5", false);
        assert_eq!(m.selected_item(), Some("5"));
        m.pick_item("1", true);
        assert_eq!(m.selected_item(), Some("5"));
    }

    #[test]
    fn filled_slot_removes_without_changing_state() {
        let mut m = SelectionMachine::new();
        m.pick_item("4", false);
        let action = m.activate_slot(slot("Dough", 9), true);
        assert_eq!(action, Some(SlotAction::Remove { slot: slot("Dough", 9) }));
        assert_eq!(m.selected_item(), Some("4"));

        let mut m = SelectionMachine::new();
        m.activate_slot(slot("Dough", 1), false);
        m.activate_slot(slot("Dough", 2), true);
        assert_eq!(m.pending_slot(), Some(slot("Dough", 1)));
    }

    #[test]
    fn pending_slot_can_be_moved_or_cancelled() {
        let mut m = SelectionMachine::new();
        m.activate_slot(slot("Noodle", 0), false);
        m.activate_slot(slot("Noodle", 1), false);
        assert_eq!(m.pending_slot(), Some(slot("Noodle", 1)));
        m.activate_slot(slot("Noodle", 1), false);
        assert_eq!(m.state(), &Selection::Idle);
    }

    #[test]
    fn drop_only_lands_on_empty_slots() {
        let mut m = SelectionMachine::new();
        m.pick_item("2", false);
        assert_eq!(m.drop_on_slot("3", slot("Grain", 0), true), None);
        assert_eq!(m.selected_item(), Some("2"));
        let action = m.drop_on_slot("3", slot("Grain", 1), false);
        assert_eq!(
            action,
            Some(SlotAction::Assign { slot: slot("Grain", 1), starch_id: "3".into() })
        );
        assert_eq!(m.state(), &Selection::Idle);
    }

    #[test]
    fn forgetting_deleted_item() {
        let mut m = SelectionMachine::new();
        m.pick_item("8", false);
        m.forget_item("9");
        assert_eq!(m.selected_item(), Some("8"));
        m.forget_item("8");
        assert_eq!(m.state(), &Selection::Idle);
    }
}
