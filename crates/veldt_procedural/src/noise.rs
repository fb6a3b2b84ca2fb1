//! # Cubic Value Noise
//!
//! Seeded, coherent 2D noise: lattice values interpolated with a
//! Catmull-Rom spline over the surrounding 4x4 neighborhood.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`WorldSeed`], `sample` returns **exactly** the same value
//! for the same coordinates on any platform, any time. Terrain is never
//! transmitted between participants; this guarantee is what makes that work.
//!
//! ## Bounds
//!
//! Output is clamped to `[-1, 1]`. Lattice values live in `[-1, 1]` and the
//! spline can overshoot by at most 1.5 per axis, so results are scaled by
//! the cubic bounding factor before the clamp.

use crate::seed::WorldSeed;

/// 2D cubic value noise generator.
///
/// Construction shuffles a permutation table and fills a lattice value
/// table from the seed; sampling is allocation-free after that.
pub struct CubicNoise {
    /// Seeded permutation of 0..=255 used to hash lattice coordinates.
    perm: [u8; 256],
    /// Seeded lattice values in `[-1, 1]`, indexed by hashed coordinates.
    values: [f64; 256],
}

impl CubicNoise {
    /// Catmull-Rom over `[-1, 1]` lattice values overshoots by up to 1.5
    /// per interpolation axis.
    const BOUNDING: f64 = 1.0 / (1.5 * 1.5);

    /// Creates a noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        // Widen the 32-bit seed; the xor keeps seed 0 from collapsing the
        // xorshift state.
        let mut state = (seed.value() as u32 as u64) ^ 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut perm = [0u8; 256];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Fisher-Yates with the seeded xorshift.
        for i in (1..256).rev() {
            let j = (next() as usize) % (i + 1);
            perm.swap(i, j);
        }

        let mut values = [0f64; 256];
        for slot in &mut values {
            // Top 53 bits -> [0, 1) -> [-1, 1).
            *slot = (next() >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0;
        }

        Self { perm, values }
    }

    /// Samples noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in `[-1, 1]`, identical for identical (seed, x, y).
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = fast_floor(x);
        let yi = fast_floor(y);
        let xf = x - f64::from(xi);
        let yf = y - f64::from(yi);

        let mut rows = [0.0f64; 4];
        for (j, row) in rows.iter_mut().enumerate() {
            let iy = yi + j as i32 - 1;
            *row = catmull_rom(
                self.lattice(xi - 1, iy),
                self.lattice(xi, iy),
                self.lattice(xi + 1, iy),
                self.lattice(xi + 2, iy),
                xf,
            );
        }

        let v = catmull_rom(rows[0], rows[1], rows[2], rows[3], yf) * Self::BOUNDING;
        v.clamp(-1.0, 1.0)
    }

    /// Deterministic lattice value for an integer grid point.
    #[inline]
    fn lattice(&self, ix: i32, iy: i32) -> f64 {
        let a = self.perm[(ix & 0xff) as usize] as usize;
        let b = self.perm[(a + (iy & 0xff) as usize) & 0xff] as usize;
        self.values[b]
    }
}

/// Catmull-Rom spline through `p1` and `p2` with tangents from `p0`/`p3`.
#[inline]
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let a = 2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3;
    let b = 3.0 * (p1 - p2) + p3 - p0;
    p1 + 0.5 * t * (p2 - p0 + t * (a + t * b))
}

/// Faster than `f64::floor` for the coordinate magnitudes seen here.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi - 1
    } else {
        xi
    }
}
