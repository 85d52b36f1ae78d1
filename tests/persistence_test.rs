//! Integration tests for the persistence gateway: JSON stores on disk,
//! legacy save migration, binary backups and the session save worker.

use idlehunt::catalog::Catalog;
use idlehunt::character::save::{
    decode_state, encode_state, read_backup, write_backup, JsonStore, MemoryStore, PlayerStore,
    StoreError,
};
use idlehunt::character::skills::SkillType;
use idlehunt::core::engine::{Engine, SaveWorker};
use idlehunt::core::game_state::{Activity, Hunt, PlayerState};
use idlehunt::items::types::EquipmentSlot;
use std::path::PathBuf;

// =============================================================================
// Helper Functions
// =============================================================================

struct TempDir(PathBuf);

impl TempDir {
    fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("idlehunt-{}-{}", label, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn veteran(catalog: &Catalog) -> PlayerState {
    let mut state = PlayerState::register("Veteran".to_string(), catalog, 1_000);
    state.level = 23;
    state.gold = 4_321;
    state.bank_gold = 10_000;
    state.inventory.add("health_potion", 7);
    state.depot.add("orc_tooth", 2);
    state.skipped_loot.insert("cheese".to_string());
    state.purchased_spells.insert("light_healing".to_string());
    state.boss_cooldowns.insert("munster".to_string(), 99_000);
    state.activity = Activity::Hunting(Hunt {
        monster_id: "orc".to_string(),
        is_boss: false,
        group_size: 2,
        monster_hp: 40,
    });
    state
}

// =============================================================================
// 1. JSON store
// =============================================================================

#[test]
fn test_json_store_round_trip() {
    let tmp = TempDir::new("roundtrip");
    let store = JsonStore::with_dir(&tmp.0).unwrap();
    let catalog = Catalog::default_content();
    let state = veteran(&catalog);

    assert!(!store.exists("veteran"));
    store.save("veteran", &state).unwrap();
    assert!(store.exists("veteran"));
    assert_eq!(store.load("veteran").unwrap(), state);
}

#[test]
fn test_json_store_missing_account() {
    let tmp = TempDir::new("missing");
    let store = JsonStore::with_dir(&tmp.0).unwrap();
    assert!(matches!(store.load("nobody"), Err(StoreError::NotFound(_))));
}

#[test]
fn test_json_store_accounts_are_case_insensitive() {
    let tmp = TempDir::new("case");
    let store = JsonStore::with_dir(&tmp.0).unwrap();
    let state = PlayerState::new("Alice".to_string(), 0);
    store.save("Alice", &state).unwrap();
    assert_eq!(store.load("alice").unwrap().name, "Alice");
}

#[test]
fn test_corrupt_file_is_an_error_not_a_reset() {
    let tmp = TempDir::new("corrupt");
    let store = JsonStore::with_dir(&tmp.0).unwrap();
    std::fs::write(tmp.0.join("broken.json"), "{ not json").unwrap();
    assert!(matches!(store.load("broken"), Err(StoreError::Json(_))));
}

// =============================================================================
// 2. Forward compatibility
// =============================================================================

#[test]
fn test_sparse_save_fills_defaults() {
    let json = r#"{"version": 2, "player": {"name": "Sparse", "level": 4, "gold": 12}}"#;
    let state = decode_state(json).unwrap();
    assert_eq!(state.name, "Sparse");
    assert_eq!(state.level, 4);
    assert_eq!(state.gold, 12);
    assert_eq!(state.activity, Activity::Idle);
    assert!(state.task_options.is_empty());
    assert!(!state.has_blessing);
    assert!(state.equipment.get(EquipmentSlot::Head).is_none());
}

#[test]
fn test_legacy_file_on_disk_migrates_and_resaves() {
    let tmp = TempDir::new("legacy");
    std::fs::write(
        tmp.0.join("oldtimer.json"),
        r#"{"name": "Oldtimer", "level": 9, "active_training_skill": "axe"}"#,
    )
    .unwrap();
    let store = JsonStore::with_dir(&tmp.0).unwrap();

    let state = store.load("oldtimer").unwrap();
    assert_eq!(state.training_skill(), Some(SkillType::Axe));
    store.save("oldtimer", &state).unwrap();

    let raw = std::fs::read_to_string(tmp.0.join("oldtimer.json")).unwrap();
    assert!(raw.contains("\"version\""));
    assert_eq!(store.load("oldtimer").unwrap(), state);
}

#[test]
fn test_encoded_state_is_an_envelope() {
    let state = PlayerState::new("Enveloped".to_string(), 0);
    let json = encode_state(&state).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 2);
    assert_eq!(value["player"]["name"], "Enveloped");
    assert_eq!(value["player"]["activity"], "idle");
}

// =============================================================================
// 3. Backups
// =============================================================================

#[test]
fn test_backup_file_round_trip() {
    let tmp = TempDir::new("backup");
    let catalog = Catalog::default_content();
    let state = veteran(&catalog);
    let path = tmp.0.join("veteran.bak");
    write_backup(&path, &state).unwrap();
    assert_eq!(read_backup(&path).unwrap(), state);
}

// =============================================================================
// 4. Session saves
// =============================================================================

#[test]
fn test_save_worker_keeps_latest_snapshot() {
    let store = MemoryStore::new();
    let reader = store.clone();
    let saver = SaveWorker::spawn(store, "acct".to_string());
    for gold in 0..20u64 {
        let mut state = PlayerState::new("Saver".to_string(), 0);
        state.gold = gold;
        saver.submit(state);
    }
    let mut last = PlayerState::new("Saver".to_string(), 0);
    last.gold = 777;
    saver.finish(last).unwrap();
    assert_eq!(reader.load("acct").unwrap().gold, 777);
}

#[test]
fn test_engine_reload_preserves_state() {
    let tmp = TempDir::new("reload");
    let store = JsonStore::with_dir(&tmp.0).unwrap();
    let catalog = Catalog::default_content();

    let (mut engine, _) =
        Engine::load_or_register(&store, "hero", Some("Hero"), catalog.clone(), 5_000).unwrap();
    let snapshot = engine.snapshot_for_save(5_000);
    store.save("hero", &snapshot).unwrap();

    // Back within the minute: no catch-up.
    let (reloaded, report) = Engine::load_or_register(&store, "hero", None, catalog, 30_000).unwrap();
    assert!(report.is_none());
    assert_eq!(reloaded.state().name, "Hero");
    assert_eq!(reloaded.state().task_options, snapshot.task_options);
    assert_eq!(reloaded.state().last_save_time, 30_000);
}
