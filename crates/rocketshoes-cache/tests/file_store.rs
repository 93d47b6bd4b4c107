//! File-backed store behaviour.

use rocketshoes_cache::{Cache, FileStore, KeyValueStore};

#[test]
fn test_missing_key_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    assert_eq!(store.get("@RocketShoes:cart").unwrap(), None);
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let cache = Cache::new(FileStore::open(dir.path()).unwrap());
        cache.set("@RocketShoes:cart", &vec!["a", "b"]).unwrap();
    }

    let cache = Cache::new(FileStore::open(dir.path()).unwrap());
    let value: Option<Vec<String>> = cache.get("@RocketShoes:cart").unwrap();
    assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_keys_map_to_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    store.set("ns:cart", b"[]").unwrap();
    store.set("ns:wishlist", b"[1]").unwrap();

    assert_ne!(store.path_for("ns:cart"), store.path_for("ns:wishlist"));
    assert!(store.path_for("ns:cart").exists());
    assert_eq!(store.get("ns:wishlist").unwrap(), Some(b"[1]".to_vec()));
}

#[test]
fn test_delete_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    store.set("k", b"true").unwrap();
    store.delete("k").unwrap();

    assert!(!store.path_for("k").exists());
    assert!(store.delete("k").is_ok());
}

#[test]
fn test_open_creates_nested_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");

    let store = FileStore::open(&nested).unwrap();
    assert!(store.dir().is_dir());
}
