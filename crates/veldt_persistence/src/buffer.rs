//! Pending authored mutations awaiting the next flush.

use std::collections::HashMap;
use veldt_shared::{ChangeRecord, TilePos};

/// The set of changes made since the last successful flush.
///
/// Keyed by coordinate: recording a second change at the same cell replaces
/// the first, so the buffer always holds exactly the latest intent per cell
/// and re-recording an identical change never grows it. Layer does not
/// participate in the key; a cell has one latest intent even though tiles
/// are layered.
#[derive(Debug, Default)]
pub struct ChangeBuffer {
    pending: HashMap<TilePos, ChangeRecord>,
}

impl ChangeBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change, superseding any earlier change at the same cell.
    pub fn record(&mut self, record: ChangeRecord) {
        self.pending.insert(record.pos, record);
    }

    /// Whether any pending change touches `pos`.
    #[must_use]
    pub fn contains(&self, pos: TilePos) -> bool {
        self.pending.contains_key(&pos)
    }

    /// Iterates over the pending records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.pending.values()
    }

    /// Number of cells with a pending change.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending change. Called only after a successful flush.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
