//! Seeded gradient noise.
//!
//! 2D Perlin-style noise over a fixed palette of evenly spaced unit
//! gradients. Lattice points pick a gradient through an integer hash of
//! their coordinates and the seed.

use std::f64::consts::PI;

use super::{lerp, smoothstep, Noise2D};

/// 2D gradient noise generator. Output is in [0, 1].
#[derive(Debug, Clone)]
pub struct GradientNoise {
    seed: i32,
    /// Unit vectors at angles `2πi/N`.
    gradients: Vec<[f64; 2]>,
}

impl GradientNoise {
    /// Standard gradient palette size.
    pub const STANDARD_TABLE: usize = 256;
    /// High precision gradient palette size.
    pub const HIGH_TABLE: usize = 1024;

    /// Create a generator with a gradient palette of `table_size` entries.
    ///
    /// A zero table size is treated as one.
    pub fn new(seed: i32, table_size: usize) -> Self {
        let n = table_size.max(1);
        let gradients = (0..n)
            .map(|i| {
                let angle = i as f64 * 2.0 * PI / n as f64;
                [angle.cos(), angle.sin()]
            })
            .collect();
        Self { seed, gradients }
    }

    /// The seed this generator hashes lattice points with.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Number of gradients in the palette.
    pub fn table_size(&self) -> usize {
        self.gradients.len()
    }

    /// Gradient palette index for a lattice point.
    ///
    /// `a = ix + 57·iy + 131·seed`, mixed as `a(a²·15731 + 789221) + 1376312589`
    /// in wrapping 32-bit arithmetic and masked non-negative.
    #[inline]
    pub fn lattice_index(&self, ix: i32, iy: i32) -> usize {
        let a = ix
            .wrapping_add(iy.wrapping_mul(57))
            .wrapping_add(self.seed.wrapping_mul(131));
        let mixed = a
            .wrapping_mul(a.wrapping_mul(a).wrapping_mul(15731).wrapping_add(789_221))
            .wrapping_add(1_376_312_589)
            & 0x7fff_ffff;
        mixed as usize % self.gradients.len()
    }

    #[inline]
    fn gradient(&self, ix: i32, iy: i32) -> [f64; 2] {
        self.gradients[self.lattice_index(ix, iy)]
    }
}

impl Noise2D for GradientNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let fx = x.floor();
        let fy = y.floor();
        let ix = fx as i32;
        let iy = fy as i32;

        // Offsets from the lower corner.
        let x0 = x - fx;
        let y0 = y - fy;
        let x1 = x0 - 1.0;
        let y1 = y0 - 1.0;

        let dot = |g: [f64; 2], dx: f64, dy: f64| g[0] * dx + g[1] * dy;

        let n00 = dot(self.gradient(ix, iy), x0, y0);
        let n10 = dot(self.gradient(ix.wrapping_add(1), iy), x1, y0);
        let n01 = dot(self.gradient(ix, iy.wrapping_add(1)), x0, y1);
        let n11 = dot(self.gradient(ix.wrapping_add(1), iy.wrapping_add(1)), x1, y1);

        let sx = smoothstep(x0);
        let sy = smoothstep(y0);

        let nx0 = lerp(n00, n10, sx);
        let nx1 = lerp(n01, n11, sx);
        let value = lerp(nx0, nx1, sy);

        ((value + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
