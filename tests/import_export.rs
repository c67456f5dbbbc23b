mod common;

use chrono::{TimeZone, Utc};
use common::{fixture, slot};
use starchseed::errors::SeedingError;
use starchseed::export::{
    export_filename, full_export, parse_import, readable_export, render_export, ExportFormat,
};
use starchseed::pool::StarchDraft;
use starchseed::state::SeedingState;

#[test]
fn full_export_then_import_reproduces_pool_and_grid() {
    let mut state = SeedingState::default();
    let draft = StarchDraft::new(
        "Garlic Knots",
        Some("🧄"),
        Some("data:image/png;base64,AAAA".into()),
    )
    .unwrap();
    let id = state.add_starch(draft);
    state.shuffle_seed();
    state.assign(slot("Dough", 0), &id);
    state.rename("Carb Cup".into());

    let text = render_export(&state, ExportFormat::Full, Utc::now()).unwrap();
    let imported = parse_import(&text).unwrap();
    assert_eq!(&imported.pool, state.pool());
    assert_eq!(&imported.grid, state.grid());
    assert_eq!(imported.name.as_deref(), Some("Carb Cup"));

    let mut fresh = SeedingState::default();
    fresh.replace(imported.pool, imported.grid, imported.name);
    assert_eq!(fresh.snapshot().starches, state.snapshot().starches);
    assert_eq!(fresh.grid(), state.grid());
    assert_eq!(
        fresh.pool().get(&id).and_then(|s| s.image_url.as_deref()),
        Some("data:image/png;base64,AAAA")
    );
}

#[test]
fn fixture_import_repairs_dangling_and_duplicate_seeds() {
    let imported = parse_import(&fixture("carb-classic-bracket.json")).unwrap();
    assert_eq!(imported.name.as_deref(), Some("Carb Classic"));
    assert_eq!(imported.pool.len(), 5);
    let grid = &imported.grid;
    assert_eq!(grid.regions()[0].name, "Grain");
    assert_eq!(grid.get(slot("Grain", 0)), Some("1"));
    assert_eq!(grid.get(slot("Grain", 15)), Some("2"));
    assert_eq!(grid.get(slot("Tuber", 3)), Some("3"));
    assert_eq!(grid.get(slot("Noodle", 7)), Some("4"));
    assert_eq!(grid.get(slot("Dough", 1)), None);
    assert_eq!(grid.get(slot("Dough", 8)), None);
    assert_eq!(grid.filled_count(), 4);
}

#[test]
fn import_rejections_leave_state_alone() {
    let mut state = SeedingState::default();
    state.auto_seed();
    let before = state.snapshot();
    let bad = [
        "",
        "not json",
        r#"{"name":"X"}"#,
        r#"{"starches":[{"id":"1","name":"A","emoji":"🍞"}],"regions":[]}"#,
        r#"{"starches":[{"id":"1","name":"A"}],"regions":[{"name":"Rice","seeds":[]}]}"#,
    ];
    for text in bad {
        match parse_import(text) {
            Ok(imported) => panic!("accepted {:?}: {:?}", text, imported),
            Err(SeedingError::InvalidImport(_)) | Err(SeedingError::UnparseableImport(_)) => {}
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }
    assert_eq!(state.snapshot(), before);
}

#[test]
fn readable_export_document_shape() {
    let mut state = SeedingState::default();
    state.assign(slot("Noodle", 7), "20");
    let now = Utc.with_ymd_and_hms(2026, 3, 15, 18, 5, 9).unwrap();
    let doc = serde_json::to_value(readable_export(&state, now)).unwrap();
    assert_eq!(doc["name"], "Starch Madness 2026");
    assert_eq!(doc["createdAt"], "2026-03-15T18:05:09.000Z");
    let regions = doc["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 4);
    let noodle = &regions[2];
    assert_eq!(noodle["name"], "Noodle");
    let game2 = &noodle["matchups"][1];
    assert_eq!(game2["game"], "#8 vs #9");
    assert_eq!(game2["top"]["seed"], 8);
    assert_eq!(game2["top"]["name"], state.pool().get("20").unwrap().name.as_str());
    assert_eq!(game2["bottom"], serde_json::json!({ "seed": 9, "name": "(empty)" }));
}

#[test]
fn full_export_nulls_unknown_seeds() {
    let mut state = SeedingState::default();
    state.assign(slot("Grain", 4), "999");
    let doc = full_export(&state, Utc::now());
    assert!(doc.regions[0].seeds.iter().all(Option::is_none));
}

#[test]
fn filenames_follow_tournament_name() {
    assert_eq!(
        export_filename("Starch Madness 2026", ExportFormat::Full),
        "starch-madness-2026-bracket.json"
    );
    assert_eq!(
        export_filename("!!!Noodle   Bowl!!!", ExportFormat::Matchups),
        "noodle-bowl-matchups.json"
    );
}

#[test]
fn adding_after_importing_a_huge_id_gets_a_fresh_id() {
    let text = r#"{
        "name": "Big Numbers",
        "starches": [{"id":"18446744073709551615","name":"Huge Loaf","emoji":"🍞"}],
        "regions": [
            {"name":"Grain","seeds":["18446744073709551615",null,null,null,null,null,null,null,null,null,null,null,null,null,null,null]},
            {"name":"Tuber","seeds":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null]},
            {"name":"Noodle","seeds":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null]},
            {"name":"Dough","seeds":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null]}
        ]
    }"#;
    let imported = parse_import(text).unwrap();
    let mut state = SeedingState::default();
    state.replace(imported.pool, imported.grid, imported.name);
    let id = state.add_starch(StarchDraft::new("Tiny Roll", None, None).unwrap());
    assert_eq!(id, "18446744073709551616");
    assert_eq!(state.pool().len(), 2);
    assert_eq!(state.grid().get(slot("Grain", 0)), Some("18446744073709551615"));
}
