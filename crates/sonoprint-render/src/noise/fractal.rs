//! Fractal (multi-octave) noise.
//!
//! Layers octaves of a base noise function at doubling frequency and
//! decaying amplitude, then divides by the amplitude sum so the result keeps
//! the base noise's [0, 1] range for any octave count.

use super::{Noise2D, NoiseCache};

/// Fractal noise sampler over a base generator.
#[derive(Debug, Clone)]
pub struct FractalNoise<N: Noise2D> {
    /// The base noise function.
    noise: N,
    /// Base frequency applied to pixel coordinates.
    scale: f64,
    /// Number of octaves to combine.
    octaves: u8,
    /// Amplitude multiplier per octave.
    persistence: f64,
    /// Offset added to both coordinates so different seeds shift the field.
    phase: f64,
}

impl<N: Noise2D> FractalNoise<N> {
    /// Create a sampler with 4 octaves, 0.5 persistence, unit scale and no phase.
    pub fn new(noise: N) -> Self {
        Self {
            noise,
            scale: 1.0,
            octaves: 4,
            persistence: 0.5,
            phase: 0.0,
        }
    }

    /// Set the number of octaves (at least one).
    pub fn with_octaves(mut self, octaves: u8) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    /// Set the persistence (amplitude multiplier per octave).
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Set the base frequency.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the phase offset.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn octaves(&self) -> u8 {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// The base noise generator.
    pub fn base(&self) -> &N {
        &self.noise
    }

    /// `Σ persistence^i` for `i < octaves`; the divisor applied to every sample.
    pub fn amplitude_sum(&self) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..self.octaves {
            sum += amplitude;
            amplitude *= self.persistence;
        }
        sum
    }

    /// Sample through a memo table. Returns exactly what [`Noise2D::sample`] does.
    pub fn sample_cached(&self, cache: &mut NoiseCache, x: f64, y: f64) -> f64 {
        self.accumulate(x, y, |sx, sy| {
            cache.get_or_insert_with(sx, sy, || self.noise.sample(sx, sy))
        })
    }

    #[inline]
    fn accumulate<F>(&self, x: f64, y: f64, mut base: F) -> f64
    where
        F: FnMut(f64, f64) -> f64,
    {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..self.octaves {
            let sx = x * self.scale * frequency + self.phase;
            let sy = y * self.scale * frequency + self.phase;
            total += base(sx, sy) * amplitude;
            amplitude *= self.persistence;
            frequency *= 2.0;
        }

        (total / self.amplitude_sum()).clamp(0.0, 1.0)
    }
}

impl<N: Noise2D> Noise2D for FractalNoise<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.accumulate(x, y, |sx, sy| self.noise.sample(sx, sy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::GradientNoise;

    fn base() -> GradientNoise {
        GradientNoise::new(42, GradientNoise::STANDARD_TABLE)
    }

    #[test]
    fn test_fractal_deterministic() {
        let noise1 = FractalNoise::new(base()).with_scale(0.01);
        let noise2 = FractalNoise::new(base()).with_scale(0.01);

        for i in 0..100 {
            let x = i as f64 * 3.1;
            let y = i as f64 * 4.7;
            assert_eq!(noise1.sample(x, y), noise2.sample(x, y));
        }
    }

    #[test]
    fn test_amplitude_sum_is_geometric_series() {
        let fractal = FractalNoise::new(base()).with_octaves(4).with_persistence(0.5);
        assert!((fractal.amplitude_sum() - 1.875).abs() < 1e-12);

        let single = FractalNoise::new(base()).with_octaves(1).with_persistence(0.7);
        assert_eq!(single.amplitude_sum(), 1.0);
    }

    #[test]
    fn test_zero_octaves_clamps_to_one() {
        let fractal = FractalNoise::new(base()).with_octaves(0);
        assert_eq!(fractal.octaves(), 1);
    }

    #[test]
    fn test_single_octave_matches_base() {
        let fractal = FractalNoise::new(base()).with_octaves(1).with_scale(0.02);
        let noise = base();
        for i in 0..50 {
            let x = i as f64 * 7.0;
            let y = i as f64 * 3.0;
            assert_eq!(fractal.sample(x, y), noise.sample(x * 0.02, y * 0.02));
        }
    }

    #[test]
    fn test_cached_matches_uncached() {
        let fractal = FractalNoise::new(base())
            .with_octaves(5)
            .with_persistence(0.6)
            .with_scale(0.013)
            .with_phase(17.25);
        let mut cache = NoiseCache::new(1024);

        for pass in 0..2 {
            for i in 0..40 {
                for j in 0..40 {
                    let (x, y) = (i as f64, j as f64);
                    assert_eq!(
                        fractal.sample_cached(&mut cache, x, y),
                        fractal.sample(x, y),
                        "pass {} at ({}, {})",
                        pass,
                        x,
                        y
                    );
                }
            }
        }
        let (hits, _) = cache.stats();
        assert!(hits > 0);
    }

    #[test]
    fn test_phase_shifts_field() {
        let plain = FractalNoise::new(base()).with_scale(0.05);
        let shifted = FractalNoise::new(base()).with_scale(0.05).with_phase(3.7);
        let differing = (0..100)
            .filter(|&i| plain.sample(i as f64, 0.0) != shifted.sample(i as f64, 0.0))
            .count();
        assert!(differing > 50);
    }
}
