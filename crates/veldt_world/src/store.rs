//! The layered sparse tile store.

use crate::catalog::TileCatalog;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use veldt_persistence::ChangeBuffer;
use veldt_shared::{ChangeRecord, Layer, TileChanged, TilePos};

/// The single source of truth for world state.
///
/// One sparse grid per [`Layer`] over an unbounded coordinate space.
/// Writes resolve tile names against the catalog: a known name occupies
/// the slot, an unknown one clears it - generation, replay and gameplay
/// all use the same write path and only differ in whether the edit is
/// persist-worthy.
pub struct LayeredTileStore {
    catalog: Arc<TileCatalog>,
    grids: [HashMap<TilePos, String>; Layer::COUNT],
    buffer: Arc<Mutex<ChangeBuffer>>,
    subscribers: Mutex<Vec<Sender<TileChanged>>>,
}

impl LayeredTileStore {
    /// Creates an empty store over a catalog and a shared change buffer.
    ///
    /// The same buffer handle must be given to the snapshot engine so that
    /// its flush lock also excludes concurrent persisted writes.
    #[must_use]
    pub fn new(catalog: Arc<TileCatalog>, buffer: Arc<Mutex<ChangeBuffer>>) -> Self {
        Self {
            catalog,
            grids: std::array::from_fn(|_| HashMap::new()),
            buffer,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Writes a tile into `(layer, pos)`, overwriting any prior value.
    ///
    /// A name the catalog does not resolve clears the slot instead of
    /// failing; that is the removal idiom, not an error. When `persist` is
    /// true the change (with the requested name, resolved or not) is
    /// recorded for the next flush - pass `false` for generated defaults
    /// and snapshot replay, or every restart would re-save history.
    pub fn set_tile(&mut self, pos: TilePos, name: &str, layer: Layer, persist: bool) {
        let resolved = self.catalog.resolve(name).is_some();
        let grid = &mut self.grids[layer.index()];
        if resolved {
            grid.insert(pos, name.to_string());
        } else {
            grid.remove(&pos);
        }

        if persist {
            self.buffer
                .lock()
                .record(ChangeRecord::new(pos, name, layer));
        }

        self.publish(TileChanged {
            pos,
            layer,
            tile: resolved.then(|| name.to_string()),
        });
    }

    /// The tile occupying `(layer, pos)`, or `None` for an empty cell.
    #[must_use]
    pub fn get_tile(&self, pos: TilePos, layer: Layer) -> Option<&str> {
        self.grids[layer.index()].get(&pos).map(String::as_str)
    }

    /// Whether movement into `pos` is blocked.
    ///
    /// True when the solids mask holds a tile the catalog marks solid.
    #[must_use]
    pub fn is_solid(&self, pos: TilePos) -> bool {
        self.get_tile(pos, Layer::SolidsMask)
            .and_then(|name| self.catalog.resolve(name))
            .map_or(false, |def| def.solid)
    }

    /// Replays one persisted record. Never re-enters the change buffer.
    pub fn apply(&mut self, record: &ChangeRecord) {
        self.set_tile(record.pos, &record.tile, record.layer, false);
    }

    /// Subscribes to every subsequent cell change.
    ///
    /// The store never blocks on a subscriber; one that hangs up is
    /// silently dropped on the next publish.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<TileChanged> {
        let (sender, receiver) = unbounded();
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Number of occupied cells on a layer.
    #[must_use]
    pub fn occupied(&self, layer: Layer) -> usize {
        self.grids[layer.index()].len()
    }

    fn publish(&self, event: TileChanged) {
        self.subscribers
            .lock()
            .retain(|sender| sender.try_send(event.clone()).is_ok());
    }
}
