//! Noise generation primitives.
//!
//! All noise functions are pure Rust and produce deterministic output given
//! the same seed. Every generator here returns values in [0, 1].

mod cache;
mod fractal;
mod gradient;

pub use cache::NoiseCache;
pub use fractal::FractalNoise;
pub use gradient::GradientNoise;

/// Trait for 2D noise generators.
pub trait Noise2D {
    /// Sample the noise at a given 2D coordinate.
    /// Returns a value in [0, 1].
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Smooth interpolation (smoothstep).
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
