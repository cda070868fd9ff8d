//! Breathing animation: a slow oscillation of energy and valence.
//!
//! Every frame is an independent synthesis of a perturbed profile.

use crate::error::SynthesisError;
use crate::profile::MusicProfile;
use crate::synth::{Fingerprint, ImageSynthesizer};

/// Phase advance per frame.
pub const FRAME_STEP: f64 = 0.002;
/// Peak perturbation of energy and valence.
pub const BREATH_AMPLITUDE: f64 = 0.05;

/// Frames share the base profile's seed, so only the perturbed features
/// move between them.
#[derive(Debug, Clone)]
pub struct BreathingAnimation {
    base: MusicProfile,
    size: u32,
}

impl BreathingAnimation {
    pub fn new(mut base: MusicProfile, size: u32) -> Self {
        let (seed, _) = base.resolve_seed();
        base.image_seed = Some(seed);
        Self { base, size }
    }

    /// Seed every frame renders with.
    pub fn seed(&self) -> Option<f64> {
        self.base.image_seed
    }

    /// Phase offset of frame `n`.
    pub fn offset(frame: u32) -> f64 {
        (frame as f64 + 1.0) * FRAME_STEP
    }

    /// The profile drawn at frame `n`.
    pub fn frame_profile(&self, frame: u32) -> MusicProfile {
        let offset = Self::offset(frame);
        let mut profile = self.base.clone();
        profile.energy += offset.sin() * BREATH_AMPLITUDE;
        profile.valence += (offset * 0.7).cos() * BREATH_AMPLITUDE;
        profile
    }

    pub fn frame(
        &self,
        synthesizer: &ImageSynthesizer,
        frame: u32,
    ) -> Result<Fingerprint, SynthesisError> {
        synthesizer.synthesize(&self.frame_profile(frame), self.size)
    }

    /// Synthesize frames `0..count` in order.
    pub fn frames<'a>(
        &'a self,
        synthesizer: &'a ImageSynthesizer,
        count: u32,
    ) -> impl Iterator<Item = Result<Fingerprint, SynthesisError>> + 'a {
        (0..count).map(move |n| self.frame(synthesizer, n))
    }
}
