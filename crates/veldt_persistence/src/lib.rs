//! # VELDT Persistence
//!
//! The append-then-snapshot save protocol.
//!
//! Authored tile edits accumulate in a [`ChangeBuffer`]; a flush merges the
//! buffer with the most recent snapshot on disk (last writer wins per cell)
//! and writes a brand-new timestamped snapshot. Old snapshots are never
//! edited or deleted, so the chain on disk is a replayable history of every
//! save the world has ever made.
//!
//! ## Guarantees
//!
//! 1. **No loss**: the buffer clears only after the new snapshot is on disk
//! 2. **No duplicates**: a flushed snapshot holds at most one record per cell
//! 3. **No guessing**: a malformed snapshot line aborts the operation with
//!    the offending file named, never a partial load

pub mod buffer;
pub mod error;
pub mod snapshot;

pub use buffer::ChangeBuffer;
pub use error::{PersistenceError, PersistenceResult};
pub use snapshot::SnapshotStore;
