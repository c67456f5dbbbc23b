//! End-to-end shell flows: parse, execute, render and persist.

mod common;

use common::slot;
use starchseed::bracket::Selection;
use starchseed::config::Config;
use starchseed::shell::{self, render, CommandParser, Session};
use starchseed::state::{SeedingState, Tab};
use starchseed::storage::Storage;

async fn exec(session: &mut Session, line: &str) -> String {
    session
        .execute(CommandParser::new().parse(line))
        .await
        .expect("execute")
}

#[tokio::test]
async fn both_placement_modes_reach_the_same_grid() {
    let mut item_first = Session::new(SeedingState::default(), Config::default());
    exec(&mut item_first, "PICK 10").await;
    exec(&mut item_first, "SLOT Tuber 7").await;

    let mut slot_first = Session::new(SeedingState::default(), Config::default());
    exec(&mut slot_first, "SLOT tuber 7").await;
    exec(&mut slot_first, "pick 10").await;

    let mut dropped = Session::new(SeedingState::default(), Config::default());
    exec(&mut dropped, "DROP 10 TUBER 7").await;

    assert_eq!(item_first.state().grid().get(slot("Tuber", 6)), Some("10"));
    assert_eq!(item_first.state().grid(), slot_first.state().grid());
    assert_eq!(item_first.state().grid(), dropped.state().grid());
}

#[tokio::test]
async fn seeded_starch_cannot_be_picked_from_idle() {
    let mut s = Session::new(SeedingState::default(), Config::default());
    exec(&mut s, "AUTO").await;
    let reply = exec(&mut s, "PICK 1").await;
    assert!(reply.contains("already seeded at Grain #1"));
    assert_eq!(s.selection().state(), &Selection::Idle);
}

#[tokio::test]
async fn tab_switch_renders_view() {
    let mut s = Session::new(SeedingState::default(), Config::default());
    let view = exec(&mut s, "TAB seeding").await;
    assert_eq!(s.state().tab(), Tab::Seeding);
    assert!(view.contains("Starch Pool (66) | [Bracket Seeding (0/64)] | Export"));
    assert!(view.contains("Grain Region 0/16"));
    assert!(view.contains("Dough Region 0/16"));
    assert!(view.contains("Unassigned (66):"));

    let view = exec(&mut s, "TAB export").await;
    assert!(view.contains("Status:         Incomplete"));
}

#[tokio::test]
async fn shuffle_reports_overflow() {
    let mut s = Session::new(SeedingState::default(), Config::default());
    let reply = exec(&mut s, "SHUFFLE").await;
    assert_eq!(
        reply,
        "Shuffled 64 starch(es) into the bracket.\n2 starch(es) did not fit and stay unassigned.\n"
    );
    assert_eq!(render::status_line(s.state()), "Starch Madness 2026: 66 starches, 64/64 slots filled, 2 unassigned\n");
}

#[tokio::test]
async fn clear_and_reset_require_yes() {
    let mut s = Session::new(SeedingState::fresh("Carb Cup"), Config::default());
    exec(&mut s, "AUTO").await;
    exec(&mut s, "NAME Renamed").await;
    exec(&mut s, "CLEAR").await;
    assert_eq!(s.state().filled_count(), 64);
    exec(&mut s, "CLEAR YES").await;
    assert_eq!(s.state().filled_count(), 0);

    exec(&mut s, "DELETE 1 YES").await;
    exec(&mut s, "RESET").await;
    assert_eq!(s.state().pool().len(), 65);
    exec(&mut s, "RESET YES").await;
    assert_eq!(s.state().pool().len(), 66);
    assert_eq!(s.state().tournament_name(), "Carb Cup");
}

#[tokio::test]
async fn scripted_shell_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let script = "ADD Lefse | 🫓\nPICK 67\nSLOT Dough 16\nNAME Nordic Carbs\nbogus\nQUIT\n";

    {
        let storage = Storage::new(dir, "state.json").await.unwrap();
        let mut session = Session::new(SeedingState::default(), Config::default());
        let mut out = Vec::new();
        shell::run(&mut session, &storage, script.as_bytes(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Added 67. 🫓 Lefse"));
        assert!(text.contains("Unknown command 'BOGUS'"));
    }

    let storage = Storage::new(dir, "state.json").await.unwrap();
    let snap = storage.load_snapshot("Starch Madness 2026").await.unwrap();
    let state = SeedingState::from_snapshot(snap, "Starch Madness 2026");
    assert_eq!(state.tournament_name(), "Nordic Carbs");
    assert_eq!(state.pool().len(), 67);
    assert_eq!(state.grid().get(slot("Dough", 15)), Some("67"));
}
