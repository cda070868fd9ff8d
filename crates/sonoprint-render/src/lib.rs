//! Sonoprint Rendering Core
//!
//! This crate turns a listener's music-taste profile into a procedural
//! "musical fingerprint": a square image built from seeded gradient noise,
//! a palette-driven background and a few feature-gated decorative layers.
//!
//! # Features
//!
//! - **Gradient Noise**: seeded 2D Perlin noise with a memoized fractal sampler
//! - **Feature Mapping**: energy, valence, danceability and genre to render parameters
//! - **Layer Compositing**: an ordered draw-command list with W3C blend modes
//! - **Deterministic PNG**: fixed compression settings and a BLAKE3 hash
//! - **Aggregation**: per-track audio features to a profile
//!
//! # Example
//!
//! ```no_run
//! use sonoprint_render::{ImageSynthesizer, MusicProfile, PixelBuffer};
//!
//! let json = std::fs::read_to_string("profile.json").unwrap();
//! let profile: MusicProfile = serde_json::from_str(&json).unwrap();
//!
//! let fingerprint = ImageSynthesizer::default().synthesize(&profile, 400).unwrap();
//! std::fs::write("fingerprint.png", &fingerprint.image().bytes).unwrap();
//!
//! let mut surface = PixelBuffer::new_transparent(400, 400);
//! fingerprint.render(&mut surface).unwrap();
//! ```
//!
//! # Determinism
//!
//! - Same profile + same options = byte-identical PNG
//! - Seed-dependent choices draw from named PCG32 streams keyed by BLAKE3
//! - No clock or global state is read during synthesis
//! - Session uniqueness is opt-in through `sessionNonce`

pub mod aggregate;
pub mod animation;
pub mod buffer;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod mapper;
pub mod noise;
pub mod paint;
pub mod png;
pub mod profile;
pub mod rng;
pub mod synth;
pub mod telemetry;

#[cfg(test)]
mod test_support;

/// Largest supported image edge, in pixels.
pub const MAX_IMAGE_SIZE: u32 = 4096;

// Re-export main types for convenience
pub use aggregate::{
    aggregate_profile, extract_top_genres, ArtistGenres, AudioFeatures, ListenerContext,
};
pub use animation::BreathingAnimation;
pub use buffer::PixelBuffer;
pub use color::{BlendMode, Color};
pub use compose::LayerKind;
pub use config::{PngPreset, QualityTier, SynthesisOptions};
pub use error::SynthesisError;
pub use mapper::{PatternType, RenderParameters};
pub use noise::{FractalNoise, GradientNoise, Noise2D, NoiseCache};
pub use png::{EncodedImage, PngConfig, PngError};
pub use profile::{MusicProfile, SeedSource};
pub use rng::DeterministicRng;
pub use synth::{synthesize, Fingerprint, ImageSynthesizer, Surface};
pub use telemetry::{JsonLinesSink, MemorySink, SynthesisReport, TelemetrySink};
