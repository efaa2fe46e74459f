use std::fs;

use ffcs_planner::storage::{FileStorage, LocalStorage};
use ffcs_planner::timetable::{locate, AssignmentStore, FacultyUpdate, STORAGE_KEY};
use tempfile::tempdir;

#[test]
fn test_missing_entry_reads_none() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert!(storage.get_item(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_set_item_creates_directory() {
    let dir = tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("nested").join("data"));
    storage.set_item("entry", "[1,2]").unwrap();

    assert_eq!(storage.get_item("entry").unwrap().as_deref(), Some("[1,2]"));
    assert!(storage.path_for("entry").ends_with("entry.json"));
}

#[test]
fn test_store_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut store = AssignmentStore::open(FileStorage::new(dir.path()));
        let batch = vec![locate("A11").unwrap(), locate("D12").unwrap()];
        store.apply_assignment(&batch, FacultyUpdate::Add(vec!["Dr. A".into()]));
    }

    let store = AssignmentStore::open(FileStorage::new(dir.path()));
    let a11 = store.get_assignment("A11").unwrap();
    let d12 = store.get_assignment("D12").unwrap();
    assert_eq!(a11.faculty_names, vec!["Dr. A"]);
    assert_eq!(a11.group_id, d12.group_id);
    assert_eq!(d12.day, "Thursday");
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    fs::write(storage.path_for(STORAGE_KEY), "not json at all").unwrap();

    let store = AssignmentStore::open(storage);
    assert!(store.assignments().is_empty());
}

#[test]
fn test_saved_layout() {
    let dir = tempdir().unwrap();
    let mut store = AssignmentStore::open(FileStorage::new(dir.path()));
    store.apply_assignment(&[locate("B14").unwrap()], FacultyUpdate::Add(vec!["Dr. B".into()]));

    let raw = fs::read_to_string(store.storage().path_for(STORAGE_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "slotCode": "B14",
            "day": "Wednesday",
            "timeIndex": 5,
            "facultyNames": ["Dr. B"],
            "groupId": ""
        }])
    );
}

#[test]
fn test_set_item_replaces_entry_through_staging_file() {
    let dir = tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set_item(STORAGE_KEY, "[]").unwrap();
    storage.set_item(STORAGE_KEY, r#"[{"slotCode":"A11"}]"#).unwrap();

    assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some(r#"[{"slotCode":"A11"}]"#));
    assert!(!storage.staging_path_for(STORAGE_KEY).exists());
}

#[test]
fn test_leftover_staging_file_is_ignored() {
    let dir = tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set_item(STORAGE_KEY, r#"[{"slotCode":"C11","facultyNames":["Dr. C"]}]"#).unwrap();
    fs::write(storage.staging_path_for(STORAGE_KEY), r#"[{"slotCode":"C1"#).unwrap();

    let store = AssignmentStore::open(storage);
    assert_eq!(store.get_assignment("C11").unwrap().faculty_names, vec!["Dr. C"]);
}
