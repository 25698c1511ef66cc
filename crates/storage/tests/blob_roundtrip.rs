use storage::{FileBlobStore, ProgressBlobStore, decode_table, encode_table};
use tutorial_core::model::{ChapterId, ProgressTable};
use tutorial_core::time::fixed_now;

fn sample_table() -> ProgressTable {
    let now = fixed_now();
    let mut table = ProgressTable::new();
    table.mark_complete(ChapterId::new(1), now);
    table.mark_complete(ChapterId::new(2), now);
    table.set_progress(ChapterId::new(3), 60, now);
    table
}

#[test]
fn file_store_roundtrips_identical_table() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBlobStore::new(dir.path().join("progress.json"));
    let table = sample_table();

    store.write(&encode_table(&table).unwrap()).unwrap();
    let reloaded = decode_table(&store.read().unwrap().unwrap());

    assert_eq!(reloaded, table);
}

#[test]
fn corrupted_file_loads_as_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBlobStore::new(dir.path().join("progress.json"));

    store.write(&encode_table(&sample_table()).unwrap()).unwrap();
    // Truncate the blob mid-object.
    let blob = store.read().unwrap().unwrap();
    store.write(&blob[..blob.len() / 2]).unwrap();

    let reloaded = decode_table(&store.read().unwrap().unwrap());
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.highest_unlocked(), ChapterId::new(1));
}

#[test]
fn whole_blob_overwrite_wins_last_writer() {
    // Two stores on the same path model the accepted multi-tab hazard:
    // whoever writes last owns the whole blob.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let tab_a = FileBlobStore::new(&path);
    let tab_b = FileBlobStore::new(&path);

    let now = fixed_now();
    let mut table_a = ProgressTable::new();
    table_a.mark_complete(ChapterId::new(4), now);
    let mut table_b = ProgressTable::new();
    table_b.mark_complete(ChapterId::new(1), now);

    tab_a.write(&encode_table(&table_a).unwrap()).unwrap();
    tab_b.write(&encode_table(&table_b).unwrap()).unwrap();

    let reloaded = decode_table(&tab_a.read().unwrap().unwrap());
    assert_eq!(reloaded, table_b);
}
