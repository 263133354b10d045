//! Favorites persistence across plugin sessions, against the on-disk backend.

use moviedeck::favorites::FavoritesStore;
use moviedeck::storage::{FileStorage, Storage, FAVORITES_KEY};
use moviedeck::MovieRecord;
use std::path::Path;

fn open(dir: &Path) -> FavoritesStore {
    FavoritesStore::open(Box::new(FileStorage::open(dir).unwrap()))
}

fn ids(store: &FavoritesStore) -> Vec<String> {
    store.list().iter().map(|m| m.id.clone()).collect()
}

#[test]
fn favorites_survive_reopen_in_order() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = open(dir.path());
        store
            .add(MovieRecord::new("tt0133093", "The Matrix").with_year("1999"))
            .unwrap();
        store.add(MovieRecord::new("tt0113277", "Heat")).unwrap();
        store.add(MovieRecord::new("tt0078748", "Alien")).unwrap();
        store.reorder(&["tt0078748", "tt0133093", "tt0113277"]);
    }

    let store = open(dir.path());
    assert_eq!(ids(&store), vec!["tt0078748", "tt0133093", "tt0113277"]);
    assert_eq!(store.list()[1].year, "1999");
    assert!(dir.path().join(format!("{FAVORITES_KEY}.json")).exists());
}

#[test]
fn repeated_add_keeps_one_entry_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(dir.path());
    assert!(store.add(MovieRecord::new("tt0113277", "Heat")).unwrap());
    assert!(!store.add(MovieRecord::new("tt0113277", "Heat (1995)")).unwrap());
    drop(store);

    let store = open(dir.path());
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "Heat");
}

#[test]
fn removal_is_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(dir.path());
    store.add(MovieRecord::new("a", "Alpha")).unwrap();
    store.add(MovieRecord::new("b", "Beta")).unwrap();
    assert!(store.remove("a"));
    assert!(!store.remove("a"));
    drop(store);

    assert_eq!(ids(&open(dir.path())), vec!["b"]);
}

#[test]
fn hand_edited_payload_is_sanitized_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::open(dir.path()).unwrap();
    storage
        .set_item(
            FAVORITES_KEY,
            r#"[
                {"id":"a","title":"Alpha","year":"","imdbUrl":"","posterImage":""},
                {"id":"","title":"Nameless","year":"","imdbUrl":"","posterImage":""},
                {"id":"a","title":"Alpha again","year":"","imdbUrl":"","posterImage":""}
            ]"#,
        )
        .unwrap();

    let store = FavoritesStore::open(Box::new(storage));
    assert_eq!(ids(&store), vec!["a"]);
    assert_eq!(store.list()[0].title, "Alpha");
}

#[test]
fn corrupt_file_starts_empty_and_recovers_on_write() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{FAVORITES_KEY}.json")), "{not json").unwrap();

    let mut store = open(dir.path());
    assert!(store.is_empty());
    store.add(MovieRecord::new("tt1", "Recovered")).unwrap();
    drop(store);

    assert_eq!(ids(&open(dir.path())), vec!["tt1"]);
}

#[test]
fn numeric_year_and_rank_from_older_files_survive_a_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::open(dir.path()).unwrap();
    storage
        .set_item(
            FAVORITES_KEY,
            r#"[
                {"id":"tt0133093","title":"The Matrix","year":1999,"rank":120},
                {"id":"tt0113277","title":"Heat","year":"1995"},
                {"id":"tt0078748"}
            ]"#,
        )
        .unwrap();

    let mut store = FavoritesStore::open(Box::new(storage));
    assert_eq!(ids(&store), vec!["tt0133093", "tt0113277"]);
    store.add(MovieRecord::new("tt0090605", "Aliens")).unwrap();
    drop(store);

    let store = open(dir.path());
    assert_eq!(ids(&store), vec!["tt0133093", "tt0113277", "tt0090605"]);
    assert_eq!(store.list()[0].year, "1999");
}
