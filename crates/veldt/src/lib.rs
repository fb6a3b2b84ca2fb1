//! # VELDT
//!
//! A persistent, procedurally generated tile world.
//!
//! ## Architecture
//!
//! ```text
//! Seed Authority ──> Noise ──> Terrain Synthesizer
//!                                      │ defaults (never persisted)
//!                                      v
//!                            Layered Tile Store ──> subscribers
//!                                      │ persist-worthy edits
//!                                      v
//!                               Change Buffer
//!                                      │ flush / replay
//!                                      v
//!                          Snapshot Chain (on disk)
//! ```
//!
//! Terrain is a pure function of the session seed, so participants exchange
//! a single 32-bit value instead of the world itself. Everything a player
//! changes on top of the defaults flows through the change buffer into an
//! append-only snapshot chain and comes back on the next start.
//!
//! The whole inbound surface is [`WorldSession`]; hosts wrap it for
//! rendering, transport and input, none of which live here.

pub mod session;

// Re-export the units
pub use veldt_persistence as persistence;
pub use veldt_procedural as procedural;
pub use veldt_shared as shared;
pub use veldt_world as world;

// Re-export commonly used types
pub use session::WorldSession;
pub use veldt_persistence::{PersistenceError, PersistenceResult};
pub use veldt_procedural::{SeedAuthority, WorldSeed};
pub use veldt_shared::{ChangeRecord, Layer, TileChanged, TilePos, WorldConfig};
pub use veldt_world::{TileCatalog, TileDef};
