//! The snapshot merge engine.
//!
//! ## On-disk format
//!
//! A snapshot is plain text: one change record per line (`x,y,tile,layer`),
//! no header, no trailing metadata. Its filename (minus the fixed
//! extension) is a base-10 Unix timestamp in seconds. The directory holds
//! an unbounded, growing chain of such files; only the numerically largest
//! timestamp is ever read. Comparison is numeric - the names are not
//! zero-padded into sortable strings.
//!
//! ## Merge rule
//!
//! Flush keeps every record from the newest snapshot whose coordinate the
//! buffer does not touch, appends the buffer, and writes the union to a new
//! file. Identity is the coordinate alone, so a buffered write at `(5, 5)`
//! supersedes *any* prior record there, whatever its layer.
//!
//! Two flushes in the same second must not overwrite each other, so the new
//! filename is bumped to at least one past the newest existing stamp.

use crate::buffer::ChangeBuffer;
use crate::error::{PersistenceError, PersistenceResult};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use veldt_shared::constants::SNAPSHOT_EXT;
use veldt_shared::ChangeRecord;

/// Owns the snapshot chain for one world.
///
/// Exactly one process instance may own a given chain; nothing here
/// arbitrates concurrent writers. The buffer lock is held for the whole
/// read-merge-write-clear sequence, so no persisted edit can slip in
/// between the snapshot read and the buffer clear and be lost.
pub struct SnapshotStore {
    dir: PathBuf,
    buffer: Arc<Mutex<ChangeBuffer>>,
}

impl SnapshotStore {
    /// Creates a store over `dir`, which is created lazily on first flush.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, buffer: Arc<Mutex<ChangeBuffer>>) -> Self {
        Self {
            dir: dir.into(),
            buffer,
        }
    }

    /// The directory holding the chain.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Merges the pending buffer into a new snapshot and clears the buffer.
    ///
    /// Returns the path of the snapshot written. The prior snapshot is left
    /// untouched on disk.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Corrupt`] if the newest snapshot has a malformed
    /// line, [`PersistenceError::Io`] for filesystem faults. The buffer is
    /// only cleared on success.
    pub fn flush(&self) -> PersistenceResult<PathBuf> {
        let mut buffer = self.buffer.lock();

        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let newest = self.newest_snapshot()?;

        // Survivors: prior records at cells the buffer does not supersede.
        let mut merged = match &newest {
            Some((_, path)) => read_records(path)?
                .into_iter()
                .filter(|record| !buffer.contains(record.pos))
                .collect(),
            None => Vec::new(),
        };
        let survivors = merged.len();
        merged.extend(buffer.iter().cloned());

        let stamp = match newest {
            Some((newest_stamp, _)) => unix_now().max(newest_stamp + 1),
            None => unix_now(),
        };
        let path = self.dir.join(format!("{stamp}.{SNAPSHOT_EXT}"));
        write_records(&path, &merged)?;

        info!(
            snapshot = %path.display(),
            pending = buffer.len(),
            survivors,
            "flushed change buffer"
        );

        // The write is durable; only now may history leave memory.
        buffer.clear();
        Ok(path)
    }

    /// Reads the newest snapshot's records, or `None` if the chain is empty.
    ///
    /// Replay applies these with `persist = false`; records loaded from
    /// disk must never re-enter the change buffer.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::Corrupt`] names the offending file and line; no
    /// partial record set is ever returned for a corrupt file.
    pub fn load(&self) -> PersistenceResult<Option<Vec<ChangeRecord>>> {
        match self.newest_snapshot()? {
            Some((stamp, path)) => {
                let records = read_records(&path)?;
                debug!(
                    snapshot = %path.display(),
                    stamp,
                    records = records.len(),
                    "loaded newest snapshot"
                );
                Ok(Some(records))
            }
            None => Ok(None),
        }
    }

    /// Finds the snapshot with the numerically largest timestamp.
    ///
    /// Files without the snapshot extension or without a numeric stem are
    /// not part of the chain and are ignored.
    fn newest_snapshot(&self) -> PersistenceResult<Option<(u64, PathBuf)>> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut newest: Option<(u64, PathBuf)> = None;
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXT) {
                continue;
            }
            let Some(stamp) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            else {
                continue;
            };
            if newest.as_ref().map_or(true, |(best, _)| stamp > *best) {
                newest = Some((stamp, path));
            }
        }
        Ok(newest)
    }
}

/// Parses every line of a snapshot, failing fast on the first bad one.
fn read_records(path: &Path) -> PersistenceResult<Vec<ChangeRecord>> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let record =
            ChangeRecord::parse_line(line).map_err(|reason| PersistenceError::Corrupt {
                file: path.to_path_buf(),
                line: index + 1,
                reason: reason.to_string(),
            })?;
        records.push(record);
    }
    Ok(records)
}

/// Writes records one per line and syncs the file to disk.
fn write_records(path: &Path, records: &[ChangeRecord]) -> PersistenceResult<()> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{record}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    writer.get_ref().sync_all().map_err(io_err)?;
    Ok(())
}

/// Current Unix time in whole seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
