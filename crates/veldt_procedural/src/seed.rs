//! The authoritative world seed and how participants converge on it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// The 32-bit seed all terrain derives from.
///
/// Every participant in a session must hold the identical value before any
/// generation happens; terrain is never transmitted, only reproduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(i32);

impl WorldSeed {
    /// Creates a seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Where this participant's seed came from.
///
/// Exactly one participant per session is authoritative and draws a fresh
/// seed; everyone else adopts the value it publishes. The draw happens once,
/// at construction, so repeated [`SeedAuthority::seed`] calls always agree.
#[derive(Clone, Copy, Debug)]
pub struct SeedAuthority {
    seed: WorldSeed,
    authoritative: bool,
}

impl SeedAuthority {
    /// Draws a fresh seed from a random source seeded by the current time.
    ///
    /// Call this on the one canonical participant, then publish
    /// [`SeedAuthority::seed`] to every replica.
    #[must_use]
    pub fn authoritative() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut rng = ChaCha8Rng::seed_from_u64(now);
        Self {
            seed: WorldSeed::new(rng.gen()),
            authoritative: true,
        }
    }

    /// Adopts a seed received from the authoritative participant.
    #[must_use]
    pub const fn replica(seed: WorldSeed) -> Self {
        Self {
            seed,
            authoritative: false,
        }
    }

    /// The converged session seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Whether this participant drew the seed itself.
    #[inline]
    #[must_use]
    pub const fn is_authoritative(&self) -> bool {
        self.authoritative
    }
}
