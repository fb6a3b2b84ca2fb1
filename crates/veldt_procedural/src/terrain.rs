//! Threshold rule turning noise into sparse wall assignments.

use crate::noise::CubicNoise;
use crate::seed::WorldSeed;
use veldt_shared::{Layer, TilePos, WorldConfig};

/// One tile the synthesizer wants placed.
///
/// Borrowed tile names keep synthesis allocation-free per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileAssignment<'a> {
    /// The cell to write.
    pub pos: TilePos,
    /// The destination layer.
    pub layer: Layer,
    /// The tile to place there.
    pub tile: &'a str,
}

/// Deterministic default-terrain generator.
///
/// For each cell in a square region the normalized noise value decides wall
/// or floor. Walls emit a ground tile plus a solids-mask marker; floors emit
/// nothing at all, so the sparse store only ever grows with wall density.
///
/// Synthesis is idempotent and must run before snapshot replay so that
/// authored changes (including explicit removals) land on top of defaults.
pub struct TerrainSynthesizer {
    noise: CubicNoise,
    frequency: f64,
    extent: i32,
    threshold: f64,
    wall_tile: String,
    solid_tile: String,
}

impl TerrainSynthesizer {
    /// Creates a synthesizer for a session.
    ///
    /// Frequency, extent and threshold are fixed here and must not change
    /// for the lifetime of the session.
    #[must_use]
    pub fn new(seed: WorldSeed, config: &WorldConfig) -> Self {
        Self {
            noise: CubicNoise::new(seed),
            frequency: config.frequency,
            extent: config.region_extent,
            threshold: config.wall_threshold,
            wall_tile: config.wall_tile.clone(),
            solid_tile: config.solid_tile.clone(),
        }
    }

    /// Normalized noise for a cell, in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, pos: TilePos) -> f64 {
        let x = f64::from(pos.x) * self.frequency;
        let y = f64::from(pos.y) * self.frequency;
        (1.0 + self.noise.sample(x, y)) / 2.0
    }

    /// Whether the default terrain at `pos` is a wall.
    #[must_use]
    pub fn is_wall(&self, pos: TilePos) -> bool {
        self.sample(pos) <= self.threshold
    }

    /// Yields the default assignments for the square region centered on
    /// `center`.
    ///
    /// Wall cells yield two assignments (ground tile + solids-mask marker);
    /// floor cells yield none. Apply them with `persist = false`: defaults
    /// are reproducible from the seed and must never enter the change
    /// buffer.
    pub fn synthesize(&self, center: TilePos) -> impl Iterator<Item = TileAssignment<'_>> + '_ {
        let extent = self.extent;
        (-extent..extent)
            .flat_map(move |dx| (-extent..extent).map(move |dy| center.offset(dx, dy)))
            .flat_map(move |pos| {
                let cell: [Option<TileAssignment<'_>>; 2] = if self.is_wall(pos) {
                    [
                        Some(TileAssignment {
                            pos,
                            layer: Layer::Ground,
                            tile: &self.wall_tile,
                        }),
                        Some(TileAssignment {
                            pos,
                            layer: Layer::SolidsMask,
                            tile: &self.solid_tile,
                        }),
                    ]
                } else {
                    [None, None]
                };
                cell.into_iter().flatten()
            })
    }
}
