use super::*;

#[test]
fn memory_kv_set_get_remove() {
    let mut kv = MemoryKv::new();
    assert_eq!(kv.get("k").unwrap(), None);
    kv.set("k", "1").unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("1"));
    kv.remove("k").unwrap();
    assert_eq!(kv.get("k").unwrap(), None);
}

#[test]
fn file_kv_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut kv = FileKv::open(&path).unwrap();
    assert_eq!(kv.get("userWordCount").unwrap(), None);
    kv.set("userWordCount", "2").unwrap();

    let reopened = FileKv::open(&path).unwrap();
    assert_eq!(reopened.get("userWordCount").unwrap().as_deref(), Some("2"));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_kv_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut kv = FileKv::open(&path).unwrap();
    kv.set("a", "1").unwrap();
    kv.remove("a").unwrap();
    assert_eq!(FileKv::open(&path).unwrap().get("a").unwrap(), None);
}

#[test]
fn empty_or_garbage_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "  \n").unwrap();
    assert_eq!(FileKv::open(&empty).unwrap().get("x").unwrap(), None);

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json").unwrap();
    let mut kv = FileKv::open(&garbage).unwrap();
    assert_eq!(kv.get("userWordCount").unwrap(), None);

    kv.set("userWordCount", "1").unwrap();
    let reopened = FileKv::open(&garbage).unwrap();
    assert_eq!(reopened.get("userWordCount").unwrap().as_deref(), Some("1"));
}
