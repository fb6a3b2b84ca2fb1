//! World change events published to subscribers.
//!
//! The store is the only event source in the engine. Hosts subscribe to
//! redraw tiles; the engine itself never renders anything.

use crate::coords::TilePos;
use crate::layer::Layer;
use serde::{Deserialize, Serialize};

/// A cell changed on some layer.
///
/// Published for every write, whether it came from generation, replay or a
/// live edit. `tile` is the name now occupying the slot; `None` means the
/// write cleared the cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChanged {
    /// The cell that changed.
    pub pos: TilePos,
    /// The layer it changed on.
    pub layer: Layer,
    /// The resolved occupant, or `None` for a cleared cell.
    pub tile: Option<String>,
}
