//! One live world session, from seed to snapshot chain.

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use veldt_persistence::{ChangeBuffer, PersistenceResult, SnapshotStore};
use veldt_procedural::{SeedAuthority, TerrainSynthesizer, WorldSeed};
use veldt_shared::{Layer, TileChanged, TilePos, WorldConfig};
use veldt_world::{LayeredTileStore, TileCatalog};

/// The engine's inbound surface.
///
/// Owns the store, the synthesizer and the snapshot chain and wires them
/// together: one shared change buffer sits between the store (writer) and
/// the snapshot engine (flusher), under one lock.
///
/// A session is single-writer by design. Generation, mutation, save and
/// load are synchronous and never suspend mid-operation.
pub struct WorldSession {
    seed: WorldSeed,
    store: LayeredTileStore,
    synthesizer: TerrainSynthesizer,
    snapshots: SnapshotStore,
    player_tile: String,
    solid_tile: String,
}

impl WorldSession {
    /// Wires a session from a converged seed, a loaded catalog and config.
    ///
    /// The catalog must be fully loaded before this point; it is immutable
    /// for the life of the session.
    #[must_use]
    pub fn new(authority: &SeedAuthority, catalog: TileCatalog, config: &WorldConfig) -> Self {
        let seed = authority.seed();
        info!(
            seed = seed.value(),
            authoritative = authority.is_authoritative(),
            saves_dir = %config.saves_dir.display(),
            "world session starting"
        );

        let buffer = Arc::new(Mutex::new(ChangeBuffer::new()));
        let store = LayeredTileStore::new(Arc::new(catalog), Arc::clone(&buffer));
        let synthesizer = TerrainSynthesizer::new(seed, config);
        let snapshots = SnapshotStore::new(config.saves_dir.clone(), buffer);

        Self {
            seed,
            store,
            synthesizer,
            snapshots,
            player_tile: config.player_tile.clone(),
            solid_tile: config.solid_tile.clone(),
        }
    }

    /// The full startup sequence: synthesize defaults around the origin,
    /// replay the newest snapshot on top, then save.
    ///
    /// Order matters - replay must land after generation so authored
    /// changes (including removals) win over defaults.
    ///
    /// Returns whether a snapshot existed to replay.
    ///
    /// # Errors
    ///
    /// Propagates snapshot corruption and I/O faults.
    pub fn attach(&mut self) -> PersistenceResult<bool> {
        self.generate_around(TilePos::ORIGIN);
        let loaded = self.load()?;
        self.save()?;
        Ok(loaded)
    }

    /// Synthesizes default terrain for the region centered on `center`.
    ///
    /// Idempotent over unmutated cells; drive this from the host's
    /// region-center signal (typically the player position) as new areas
    /// become visible.
    pub fn generate_around(&mut self, center: TilePos) {
        let mut cells = 0usize;
        for assignment in self.synthesizer.synthesize(center) {
            self.store
                .set_tile(assignment.pos, assignment.tile, assignment.layer, false);
            cells += 1;
        }
        debug!(center = %center, assignments = cells, "synthesized region");
    }

    /// Replays the newest snapshot into the store.
    ///
    /// Returns `false` (and changes nothing) when no snapshot exists.
    /// Replayed records never re-enter the change buffer.
    ///
    /// # Errors
    ///
    /// Fatal on snapshot corruption or I/O faults; the store is not
    /// partially mutated by a corrupt file.
    pub fn load(&mut self) -> PersistenceResult<bool> {
        match self.snapshots.load()? {
            Some(records) => {
                for record in &records {
                    self.store.apply(record);
                }
                info!(records = records.len(), "replayed snapshot into store");
                Ok(true)
            }
            None => {
                info!("no snapshot present, world is pure defaults");
                Ok(false)
            }
        }
    }

    /// Flushes pending changes into a new snapshot.
    ///
    /// # Errors
    ///
    /// Propagates merge and write failures; the buffer survives a failed
    /// save.
    pub fn save(&self) -> PersistenceResult<PathBuf> {
        self.snapshots.flush()
    }

    /// Writes a tile. See [`LayeredTileStore::set_tile`] for the catalog
    /// and persistence semantics.
    pub fn set_tile(&mut self, pos: TilePos, name: &str, layer: Layer, persist: bool) {
        self.store.set_tile(pos, name, layer, persist);
    }

    /// Reads a tile.
    #[must_use]
    pub fn get_tile(&self, pos: TilePos, layer: Layer) -> Option<&str> {
        self.store.get_tile(pos, layer)
    }

    /// Whether movement into `pos` is blocked by the solids mask.
    #[must_use]
    pub fn is_solid(&self, pos: TilePos) -> bool {
        self.store.is_solid(pos)
    }

    /// Draws a player marker at `pos` and blocks the cell.
    ///
    /// Marker state is transient - it is re-derived from replication every
    /// session, so it never persists.
    pub fn place_player(&mut self, pos: TilePos) {
        let tile = self.player_tile.clone();
        let solid = self.solid_tile.clone();
        self.store.set_tile(pos, &tile, Layer::Players, false);
        self.store.set_tile(pos, &solid, Layer::SolidsMask, false);
    }

    /// Clears a player marker and unblocks the cell.
    pub fn clear_player(&mut self, pos: TilePos) {
        self.store.set_tile(pos, "", Layer::Players, false);
        self.store.set_tile(pos, "", Layer::SolidsMask, false);
    }

    /// Subscribes to every subsequent cell change.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<TileChanged> {
        self.store.subscribe()
    }

    /// The converged session seed.
    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &LayeredTileStore {
        &self.store
    }
}
