//! # Merge Semantics Integration Tests
//!
//! Pins the snapshot chain behavior that the rest of the engine relies on:
//! last writer wins per cell, merges are idempotent, and history survives
//! across consecutive snapshots.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use veldt_persistence::{ChangeBuffer, SnapshotStore};
use veldt_shared::{ChangeRecord, Layer, TilePos};

fn scratch_dir(tag: &str) -> PathBuf {
    let id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("veldt_merge_{tag}_{id}"))
}

fn store(dir: &PathBuf) -> (SnapshotStore, Arc<Mutex<ChangeBuffer>>) {
    let buffer = Arc::new(Mutex::new(ChangeBuffer::new()));
    (SnapshotStore::new(dir.clone(), Arc::clone(&buffer)), buffer)
}

#[test]
fn test_last_writer_wins_across_layers() {
    let dir = scratch_dir("lww");
    let (snapshots, buffer) = store(&dir);

    // Existing snapshot holds (5,5) on ground.
    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(5, 5), "a", Layer::Ground));
    snapshots.flush().unwrap();

    // Buffer now touches (5,5) on a *different* layer.
    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(5, 5), "b", Layer::Walkables));
    snapshots.flush().unwrap();

    // Identity is the coordinate alone: the old ground record is gone.
    let records = snapshots.load().unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], ChangeRecord::new(TilePos::new(5, 5), "b", Layer::Walkables));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unrelated_cells_survive_consecutive_saves() {
    let dir = scratch_dir("chain");
    let (snapshots, buffer) = store(&dir);

    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(1, 1), "door", Layer::Objects));
    snapshots.flush().unwrap();

    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(2, 2), "tree", Layer::Objects));
    snapshots.flush().unwrap();

    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(3, 3), "rock", Layer::Objects));
    snapshots.flush().unwrap();

    // Edits made three saves ago continue through the chain.
    let records = snapshots.load().unwrap().unwrap();
    let cells: HashSet<TilePos> = records.iter().map(|r| r.pos).collect();
    assert_eq!(records.len(), 3);
    assert!(cells.contains(&TilePos::new(1, 1)));
    assert!(cells.contains(&TilePos::new(2, 2)));
    assert!(cells.contains(&TilePos::new(3, 3)));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_empty_buffer_flush_is_idempotent() {
    let dir = scratch_dir("idem");
    let (snapshots, buffer) = store(&dir);

    for (i, name) in ["door", "tree", "rock"].iter().enumerate() {
        let x = i32::try_from(i).unwrap();
        buffer
            .lock()
            .record(ChangeRecord::new(TilePos::new(x, x), *name, Layer::Objects));
    }
    snapshots.flush().unwrap();
    let before: HashSet<ChangeRecord> = snapshots.load().unwrap().unwrap().into_iter().collect();

    // Flushing with nothing pending must reproduce the same record set.
    snapshots.flush().unwrap();
    let after: HashSet<ChangeRecord> = snapshots.load().unwrap().unwrap().into_iter().collect();

    assert_eq!(before, after);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_flush_load_round_trip_many_cells() {
    let dir = scratch_dir("roundtrip");
    let (snapshots, buffer) = store(&dir);

    let mut expected = HashSet::new();
    for i in -50..50 {
        let record = ChangeRecord::new(TilePos::new(i, -i), format!("tile_{i}"), Layer::Objects);
        expected.insert(record.clone());
        buffer.lock().record(record);
    }
    snapshots.flush().unwrap();

    let loaded: HashSet<ChangeRecord> = snapshots.load().unwrap().unwrap().into_iter().collect();
    assert_eq!(loaded, expected);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_failed_flush_preserves_the_buffer() {
    let dir = scratch_dir("failflush");
    let (snapshots, buffer) = store(&dir);

    // A corrupt snapshot sits at the head of the chain.
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("100.snap"), "1,2,door\n").unwrap();

    buffer
        .lock()
        .record(ChangeRecord::new(TilePos::new(9, 9), "door", Layer::Objects));

    // The merge fails reading the corrupt file, before anything is
    // written or cleared; the pending edit is still there to retry.
    assert!(snapshots.flush().is_err());
    assert_eq!(buffer.lock().len(), 1);
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_history_is_retained_on_disk() {
    let dir = scratch_dir("history");
    let (snapshots, buffer) = store(&dir);

    for i in 0..4 {
        buffer
            .lock()
            .record(ChangeRecord::new(TilePos::new(i, 0), "door", Layer::Objects));
        snapshots.flush().unwrap();
    }

    // Every flush appended a file; compaction is somebody else's job.
    let count = fs::read_dir(&dir).unwrap().count();
    assert_eq!(count, 4);

    fs::remove_dir_all(&dir).ok();
}
