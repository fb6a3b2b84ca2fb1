//! Authored change records and their line-oriented wire format.

use crate::coords::TilePos;
use crate::layer::Layer;
use std::fmt;
use thiserror::Error;

/// One authored mutation that must survive a restart.
///
/// Generated terrain never becomes a record; only explicit, persist-worthy
/// edits do. For merge purposes the identity of a record is its coordinate
/// alone: two records at the same `(x, y)` conflict regardless of layer or
/// tile, and the later one wins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChangeRecord {
    /// The cell this change applies to.
    pub pos: TilePos,
    /// Requested tile name. Empty means the edit cleared the cell.
    /// Must not contain commas; the line format cannot escape them.
    pub tile: String,
    /// Destination layer.
    pub layer: Layer,
}

impl ChangeRecord {
    /// Creates a record for the given cell, tile and layer.
    ///
    /// # Panics
    ///
    /// In debug builds, if `tile` contains a comma. Such a record would
    /// serialize into a line no reader accepts, corrupting the snapshot
    /// it lands in.
    #[must_use]
    pub fn new(pos: TilePos, tile: impl Into<String>, layer: Layer) -> Self {
        let tile = tile.into();
        debug_assert!(
            !tile.contains(','),
            "tile name {tile:?} cannot be represented in the line format"
        );
        Self { pos, tile, layer }
    }

    /// Parses one snapshot line: `x,y,tile,layer`.
    ///
    /// # Errors
    ///
    /// Any deviation from exactly four well-formed fields is an error; the
    /// persistence layer treats it as snapshot corruption.
    pub fn parse_line(line: &str) -> Result<Self, RecordParseError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(RecordParseError::FieldCount(fields.len()));
        }

        let x = fields[0]
            .parse::<i32>()
            .map_err(|_| RecordParseError::Coordinate(fields[0].to_string()))?;
        let y = fields[1]
            .parse::<i32>()
            .map_err(|_| RecordParseError::Coordinate(fields[1].to_string()))?;
        let layer = fields[3]
            .parse::<Layer>()
            .map_err(|e| RecordParseError::Layer(e.0))?;

        Ok(Self::new(TilePos::new(x, y), fields[2], layer))
    }
}

impl fmt::Display for ChangeRecord {
    /// The snapshot line format: `x,y,tile,layer`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.pos.x,
            self.pos.y,
            self.tile,
            self.layer.as_str()
        )
    }
}

/// Why a snapshot line failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The line did not split into exactly four comma-separated fields.
    #[error("expected 4 comma-separated fields, found {0}")]
    FieldCount(usize),

    /// A coordinate field was not a valid integer.
    #[error("invalid coordinate: {0:?}")]
    Coordinate(String),

    /// The layer field named no known layer.
    #[error("unknown layer name: {0:?}")]
    Layer(String),
}
