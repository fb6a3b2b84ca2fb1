//! # VELDT Procedural Generation
//!
//! Deterministic terrain for infinite, reproducible worlds.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: generation is a pure function of (seed, coordinate)
//! 2. **Sparse**: floor is the absence of an entry; only walls materialize
//! 3. **Converged**: every participant adopts one authoritative seed and
//!    reproduces identical terrain without ever transmitting it
//!
//! ## Core Components
//!
//! - `SeedAuthority`: draws or adopts the session seed
//! - `CubicNoise`: seeded 2D value noise, bounded to `[-1, 1]`
//! - `TerrainSynthesizer`: thresholds noise into wall assignments
//!
//! ## Example
//!
//! ```rust,ignore
//! use veldt_procedural::{SeedAuthority, TerrainSynthesizer};
//! use veldt_shared::{TilePos, WorldConfig};
//!
//! let authority = SeedAuthority::replica(WorldSeed::new(42));
//! let synth = TerrainSynthesizer::new(authority.seed(), &WorldConfig::default());
//!
//! for assignment in synth.synthesize(TilePos::ORIGIN) {
//!     // apply to the tile store with persist = false
//! }
//! ```

pub mod noise;
pub mod seed;
pub mod terrain;

pub use noise::CubicNoise;
pub use seed::{SeedAuthority, WorldSeed};
pub use terrain::{TerrainSynthesizer, TileAssignment};
