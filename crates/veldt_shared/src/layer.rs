//! The fixed set of sparse grids composing the world.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five independent sparse grids over the shared coordinate
/// space. A cell may hold a different tile per layer, or none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Base terrain: generated walls live here.
    Ground,
    /// Walkable overlays (paths, bridges).
    Walkables,
    /// Placed objects (doors, trees, furniture).
    Objects,
    /// Player position markers.
    Players,
    /// Collision mask consulted by movement.
    SolidsMask,
}

impl Layer {
    /// Number of layers.
    pub const COUNT: usize = 5;

    /// Every layer, in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ground,
        Self::Walkables,
        Self::Objects,
        Self::Players,
        Self::SolidsMask,
    ];

    /// The wire/storage name of this layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Walkables => "walkables",
            Self::Objects => "objects",
            Self::Players => "players",
            Self::SolidsMask => "solids_mask",
        }
    }

    /// Index into per-layer storage arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layer name that is not part of the fixed set.
///
/// Reported to the caller as a usage fault; the operation that produced
/// it has no effect on world state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown layer name: {0:?}")]
pub struct UnknownLayer(
    /// The unrecognized name.
    pub String,
);

impl FromStr for Layer {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground" => Ok(Self::Ground),
            "walkables" => Ok(Self::Walkables),
            "objects" => Ok(Self::Objects),
            "players" => Ok(Self::Players),
            "solids_mask" => Ok(Self::SolidsMask),
            other => Err(UnknownLayer(other.to_string())),
        }
    }
}
