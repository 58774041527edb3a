use std::fs;

use pretty_assertions::assert_eq;
use scout_core::{Contact, PostLink, ResultEntry};
use scout_engine::{encode_item, LocalStorage, StorageError};
use tempfile::TempDir;

#[test]
fn missing_file_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());

    assert!(!storage.contains_key("url").unwrap());
    assert_eq!(storage.get_item::<String>("url").unwrap(), None);
    storage.clear().unwrap();
}

#[test]
fn items_round_trip_through_json_values() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    let entries = vec![ResultEntry {
        post_link: PostLink::new("https://board.example.com/1", "Sofa"),
        contact: Contact::new("0991").with_name("Ivan"),
    }];

    storage
        .set_items(&[
            ("url", encode_item("url", "https://board.example.com").unwrap()),
            ("postLinks", encode_item("postLinks", &entries).unwrap()),
        ])
        .unwrap();

    assert!(storage.contains_key("url").unwrap());
    assert_eq!(
        storage.get_item::<String>("url").unwrap().as_deref(),
        Some("https://board.example.com")
    );
    assert_eq!(
        storage.get_item::<Vec<ResultEntry>>("postLinks").unwrap(),
        Some(entries)
    );

    let raw = fs::read_to_string(storage.path()).unwrap();
    assert!(raw.contains("phoneNumber"));
}

#[test]
fn malformed_value_reports_its_key() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    storage
        .set_items(&[("postLinks", "{not json".to_string())])
        .unwrap();

    let err = storage.get_item::<Vec<ResultEntry>>("postLinks").unwrap_err();
    assert!(matches!(err, StorageError::Json { ref key, .. } if key == "postLinks"));
}

#[test]
fn malformed_file_is_a_format_error_and_clear_removes_it() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    fs::write(storage.path(), "this is not ron {{{").unwrap();

    assert!(matches!(
        storage.contains_key("url"),
        Err(StorageError::Format(_))
    ));

    storage.clear().unwrap();
    assert!(!storage.path().exists());
    assert!(!storage.contains_key("url").unwrap());
}

#[test]
fn remove_item_keeps_other_keys() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    storage.set_item("url", "https://board.example.com").unwrap();
    storage.set_item("postLinks", &Vec::<ResultEntry>::new()).unwrap();

    storage.remove_item("url").unwrap();

    assert!(!storage.contains_key("url").unwrap());
    assert!(storage.contains_key("postLinks").unwrap());
}
