use orgchart_core::{
    default_tree, ChartService, ChartStore, Command, Employee, EmployeePatch, JsonFileStore,
    MemoryStore, StoreError,
};
use std::sync::Arc;

fn build_chart(service: &mut ChartService) {
    service
        .dispatch(Command::Add {
            parent_id: "1".to_string(),
            new_employee: Employee::with_id("2", "Jane", Some("CTO".to_string())),
        })
        .unwrap();
    service
        .dispatch(Command::Add {
            parent_id: "2".to_string(),
            new_employee: Employee::with_id("3", "Ravi", Some("Engineer".to_string())),
        })
        .unwrap();
    service
        .dispatch(Command::Edit(EmployeePatch::for_id("2").name("Jane Smith")))
        .unwrap();
}

#[test]
fn restart_restores_the_last_saved_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("org-chart.json");

    let mut service = ChartService::open(Arc::new(JsonFileStore::new(&path)));
    build_chart(&mut service);
    service.save_now().unwrap();
    let saved = service.tree().clone();
    drop(service);

    // Simulated restart: a fresh service over the same slot.
    let restored = ChartService::open(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(restored.tree(), &saved);
}

#[test]
fn open_without_prior_save_uses_the_default_tree() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("absent.json")));

    let service = ChartService::open(store);
    assert_eq!(service.tree(), &default_tree());
}

#[test]
fn open_with_corrupt_file_falls_back_to_the_default_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("org-chart.json");
    std::fs::write(&path, "{ \"id\": ").unwrap();

    let store = Arc::new(JsonFileStore::new(&path));
    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));

    let service = ChartService::open(store);
    assert_eq!(service.tree(), &default_tree());
    // The corrupt slot is left in place, not repaired.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"id\": ");
}

#[test]
fn persisted_file_matches_the_documented_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("org-chart.json");

    let mut service = ChartService::open(Arc::new(JsonFileStore::new(&path)));
    build_chart(&mut service);
    service.save_now().unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": "1",
            "name": "John Doe",
            "title": "CEO",
            "children": [{
                "id": "2",
                "name": "Jane Smith",
                "title": "CTO",
                "children": [{ "id": "3", "name": "Ravi", "title": "Engineer" }]
            }]
        })
    );
}

#[test]
fn memory_store_restart_round_trip_is_deep_equal() {
    let store = Arc::new(MemoryStore::new());
    let mut service = ChartService::with_tree(store.clone(), default_tree());
    build_chart(&mut service);
    service.save_now().unwrap();
    let saved = service.tree().clone();
    drop(service);

    let restored = ChartService::open(store);
    assert_eq!(restored.tree(), &saved);
}
