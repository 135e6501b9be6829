use focus_core::db::open_db_in_memory;
use focus_core::service::preferences::HOME_PAGE_KEY;
use focus_core::{
    load_home_page, save_home_page, HomePage, KeyValueStore, MemoryKeyValueStore,
    SqliteKeyValueStore,
};

#[test]
fn defaults_to_calendar_when_unset_or_unknown() {
    let storage = MemoryKeyValueStore::new();
    assert_eq!(load_home_page(&storage), HomePage::Calendar);

    storage.set(HOME_PAGE_KEY, "/app/somewhere-else").unwrap();
    assert_eq!(load_home_page(&storage), HomePage::Calendar);
}

#[test]
fn saved_page_is_loaded_back() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStore::new(&conn);

    save_home_page(&storage, HomePage::WeeklyRecap).unwrap();

    assert_eq!(load_home_page(&storage), HomePage::WeeklyRecap);
    assert_eq!(
        storage.get(HOME_PAGE_KEY).unwrap().as_deref(),
        Some("/app/recap")
    );
}

#[test]
fn routes_and_labels_cover_every_page() {
    for page in HomePage::ALL {
        assert_eq!(HomePage::from_route(page.route()), Some(page));
        assert!(!page.label().is_empty());
    }
    assert_eq!(HomePage::Assignments.route(), "/app/todo");
    assert_eq!(HomePage::Assignments.label(), "Assignments");
}

#[test]
fn failed_save_is_reported() {
    let storage = MemoryKeyValueStore::new();
    storage.fail_writes(true);
    assert!(save_home_page(&storage, HomePage::Settings).is_err());
    assert_eq!(load_home_page(&storage), HomePage::Calendar);
}
