//! Integration tests for the durable file store and the save gateway on top
//! of it. Each test works in its own directory under the system temp dir.

// Integration tests use expect/unwrap for clarity -- panicking on failure
// is the correct behavior in test code.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use idlework_db::{FileStore, KeyValueStore, SaveGateway};
use idlework_types::{GameData, SaveRecord, UpgradeRecord};

/// A fresh, unique directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("idlework-db-{name}-{}-{nanos}", process::id()))
}

fn sample_record() -> SaveRecord {
    let mut upgrade_data = BTreeMap::new();
    upgrade_data.insert(
        "scale_infra".to_owned(),
        UpgradeRecord {
            current_level: 2,
            current_cost: 32,
        },
    );
    SaveRecord {
        game_data: GameData {
            funds: Some(1_234),
            score: Some(99),
            experience: Some(3),
            level: Some(4),
            active_actor_count: Some(2),
            actor_speed: Some(1.0),
            ..GameData::default()
        },
        upgrade_data,
        saved_at: None,
    }
}

#[test]
fn values_survive_a_new_store_instance() {
    let dir = scratch_dir("survive");
    let mut writer = FileStore::new(&dir);
    writer.set_item("alpha", "first").unwrap();
    writer.set_item("alpha", "second").unwrap();

    let reader = FileStore::new(&dir);
    assert_eq!(reader.get_item("alpha").unwrap().as_deref(), Some("second"));
    assert_eq!(reader.get_item("missing").unwrap(), None);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn no_temp_files_left_behind() {
    let dir = scratch_dir("tmp");
    let mut store = FileStore::new(&dir);
    store.set_item("alpha", "value").unwrap();

    let names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alpha.json".to_owned()]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn remove_is_idempotent() {
    let dir = scratch_dir("remove");
    let mut store = FileStore::new(&dir);
    store.set_item("alpha", "value").unwrap();
    store.remove_item("alpha").unwrap();
    store.remove_item("alpha").unwrap();
    assert_eq!(store.get_item("alpha").unwrap(), None);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn gateway_round_trips_through_disk() {
    let dir = scratch_dir("gateway");
    let mut gateway = SaveGateway::new(FileStore::new(&dir), "idlework.save");
    assert!(gateway.load().is_none());
    assert!(gateway.save(&sample_record()));

    let reopened = SaveGateway::new(FileStore::new(&dir), "idlework.save");
    let loaded = reopened.load().expect("save should load");
    assert_eq!(loaded.game_data, sample_record().game_data);
    assert_eq!(loaded.upgrade_data, sample_record().upgrade_data);
    assert!(loaded.saved_at.is_some());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn corrupt_file_loads_as_no_save() {
    let dir = scratch_dir("corrupt");
    let store = FileStore::new(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(store.path_for("idlework.save").unwrap(), "{\"gameData\": [").unwrap();

    let gateway = SaveGateway::new(store, "idlework.save");
    assert!(gateway.load().is_none());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_fields_are_tolerated() {
    let dir = scratch_dir("lenient");
    let store = FileStore::new(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        store.path_for("idlework.save").unwrap(),
        r#"{"gameData":{"funds":7,"legacyField":true},"upgradeData":{}}"#,
    )
    .unwrap();

    let gateway = SaveGateway::new(store, "idlework.save");
    let loaded = gateway.load().expect("lenient parse");
    assert_eq!(loaded.game_data.funds, Some(7));
    assert!(loaded.saved_at.is_none());

    fs::remove_dir_all(&dir).ok();
}
