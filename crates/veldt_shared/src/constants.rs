//! # World Tuning Constants
//!
//! Defaults for a session. Hosts override them through [`crate::WorldConfig`];
//! the values here reproduce the reference world.

/// Noise frequency applied to cell coordinates before sampling.
///
/// Fixed for the lifetime of a session. Changing it mid-session would make
/// regenerated regions disagree with already-generated ones.
pub const NOISE_FREQUENCY: f64 = 0.1;

/// Half-width of the square region synthesized around a center point.
///
/// An extent of 32 yields a 64x64 cell region.
pub const REGION_EXTENT: i32 = 32;

/// Normalized noise values at or below this are walls; above is floor.
pub const WALL_THRESHOLD: f64 = 0.5;

/// Tile placed on the ground layer for generated walls.
pub const DEFAULT_WALL_TILE: &str = "wall_rock";

/// Tile placed on the solids mask for anything that blocks movement.
pub const DEFAULT_SOLID_TILE: &str = "solid";

/// Tile drawn on the players layer for a player marker.
pub const DEFAULT_PLAYER_TILE: &str = "player";

/// Directory (relative to the working directory) holding the snapshot chain.
pub const DEFAULT_SAVES_DIR: &str = "saves";

/// Extension of every snapshot file in the chain.
pub const SNAPSHOT_EXT: &str = "snap";
