//! Deterministic RNG wrapper using PCG32.
//!
//! Every seed-dependent choice in a fingerprint (burst and bubble positions,
//! signature pattern parameters, noise phase) draws from a PCG32 stream
//! derived from the image seed, so the same seed always reproduces the same
//! picture.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Create the RNG for a named stream of an image seed.
    pub fn for_stream(image_seed: f64, stream: &str) -> Self {
        Self::new(Self::derive_stream_seed(image_seed, stream))
    }

    /// Derive a 32-bit seed for a named stream using BLAKE3.
    ///
    /// The full bit pattern of the image seed is hashed, so seeds that differ
    /// only in their fractional part still produce unrelated streams.
    pub fn derive_stream_seed(image_seed: f64, stream: &str) -> u32 {
        let mut input = Vec::with_capacity(8 + stream.len());
        input.extend_from_slice(&image_seed.to_bits().to_le_bytes());
        input.extend_from_slice(stream.as_bytes());
        let hash = blake3::hash(&input);
        let b = hash.as_bytes();
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random u32.
    #[inline]
    pub fn gen_u32(&mut self) -> u32 {
        self.inner.gen::<u32>()
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Return `true` with probability `p`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.gen_f64() < p
    }
}
