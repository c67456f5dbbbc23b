mod common;

use common::slot;
use starchseed::bracket::SeedGrid;
use starchseed::pool::StarchPool;
use starchseed::state::{SeedingState, Tab};
use starchseed::storage::{Snapshot, Storage};

const NAME: &str = "Starch Madness 2026";

async fn storage_with(raw: Option<&str>) -> (tempfile::TempDir, Storage) {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::new(tmp.path().to_str().unwrap(), "state.json")
        .await
        .unwrap();
    if let Some(raw) = raw {
        std::fs::write(storage.state_path(), raw).unwrap();
    }
    (tmp, storage)
}

#[tokio::test]
async fn missing_regions_gives_empty_grid_and_keeps_pool() {
    let (_tmp, storage) = storage_with(Some(
        r#"{"starches":[{"id":"9","name":"Lefse","emoji":"🫓"}],"tournamentName":"Carb Cup","tab":"seeding"}"#,
    ))
    .await;
    let snap = storage.load_snapshot(NAME).await.unwrap();
    assert_eq!(snap.regions, SeedGrid::empty());
    assert_eq!(snap.starches.len(), 1);
    assert_eq!(snap.tournament_name, "Carb Cup");
    assert_eq!(snap.tab, Tab::Seeding);
}

#[tokio::test]
async fn missing_starches_gives_default_pool_and_keeps_grid() {
    let mut grid = SeedGrid::empty();
    starchseed::bracket::engine::assign(&mut grid, slot("Noodle", 2), "30");
    let raw = serde_json::json!({ "regions": grid, "tab": "export" }).to_string();
    let (_tmp, storage) = storage_with(Some(&raw)).await;
    let snap = storage.load_snapshot(NAME).await.unwrap();
    assert_eq!(snap.starches, StarchPool::with_defaults());
    assert_eq!(snap.regions.get(slot("Noodle", 2)), Some("30"));
    assert_eq!(snap.tournament_name, NAME);
    assert_eq!(snap.tab, Tab::Export);
}

#[tokio::test]
async fn corrupt_file_gives_defaults() {
    for raw in ["{\"starches\": [", "null", "\"text\"", "42"] {
        let (_tmp, storage) = storage_with(Some(raw)).await;
        let snap = storage.load_snapshot(NAME).await.unwrap();
        assert_eq!(snap, Snapshot::defaults(NAME), "input {:?}", raw);
    }
}

#[tokio::test]
async fn wrong_shaped_fields_fall_back_one_by_one() {
    let (_tmp, storage) = storage_with(Some(
        r#"{"starches":"nope","regions":[{"name":"Grain","seeds":[]}],"tournamentName":7,"tab":"pool"}"#,
    ))
    .await;
    let snap = storage.load_snapshot("Carb Cup").await.unwrap();
    assert_eq!(snap.starches, StarchPool::with_defaults());
    assert_eq!(snap.regions, SeedGrid::empty());
    assert_eq!(snap.tournament_name, "Carb Cup");
}

#[tokio::test]
async fn state_round_trips_through_storage() {
    let (_tmp, storage) = storage_with(None).await;
    let mut state = SeedingState::fresh(NAME);
    state.assign(slot("Dough", 15), "12");
    state.delete_starch("40");
    state.rename("Noodle Bowl".into());
    state.set_tab(Tab::Seeding);
    storage.save_snapshot(&state.snapshot()).await.unwrap();

    let restored = SeedingState::from_snapshot(storage.load_snapshot(NAME).await.unwrap(), NAME);
    assert_eq!(restored.pool(), state.pool());
    assert_eq!(restored.grid(), state.grid());
    assert_eq!(restored.tournament_name(), "Noodle Bowl");
    assert_eq!(restored.tab(), Tab::Seeding);
    assert!(restored.pool().get("40").is_none());
}

#[tokio::test]
async fn repeated_saves_leave_no_temp_files() {
    let (tmp, storage) = storage_with(None).await;
    let mut state = SeedingState::default();
    for i in 0..5 {
        state.assign(slot("Grain", i), &(i + 1).to_string());
        storage.save_snapshot(&state.snapshot()).await.unwrap();
    }
    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["state.json".to_string()]);
    let snap = storage.load_snapshot(NAME).await.unwrap();
    assert_eq!(snap.regions.filled_count(), 5);
}
