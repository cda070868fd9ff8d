//! Mapping from music features to rendering parameters.
//!
//! The mapping is many-to-few: continuous features collapse into a handful
//! of noise settings and layer switches. It is a pure function of the
//! profile and the quality tier.

use serde::{Deserialize, Serialize};

use crate::config::QualityTier;
use crate::profile::MusicProfile;

/// Energy above which the burst layer is drawn.
pub const BURST_ENERGY_THRESHOLD: f64 = 0.6;
/// Valence below which the vignette layer is drawn.
pub const VIGNETTE_VALENCE_THRESHOLD: f64 = 0.4;
/// Danceability above which the bubble layer is drawn.
pub const BUBBLE_DANCEABILITY_THRESHOLD: f64 = 0.7;

/// The signature micro-pattern drawn for a listener's top genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Lines,
    Dots,
    Waves,
    Grid,
}

impl PatternType {
    pub const ALL: [PatternType; 4] = [
        PatternType::Lines,
        PatternType::Dots,
        PatternType::Waves,
        PatternType::Grid,
    ];

    /// Pick a pattern from a genre name: the UTF-16 code of its first
    /// character, modulo 4. An empty name has no pattern.
    pub fn from_genre(genre: &str) -> Option<PatternType> {
        let code = genre.encode_utf16().next()?;
        Some(Self::ALL[code as usize % Self::ALL.len()])
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternType::Lines => "lines",
            PatternType::Dots => "dots",
            PatternType::Waves => "waves",
            PatternType::Grid => "grid",
        }
    }
}

/// Everything the compositor needs to know about a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderParameters {
    /// Base noise frequency, in noise units per pixel.
    pub scale: f64,
    /// Fractal octaves.
    pub octaves: u8,
    /// Amplitude decay per octave, in (0, 1).
    pub persistence: f64,
    /// Gain on the noise alpha mask.
    pub color_multiplier: f64,
    /// Draw the energy burst layer.
    pub bursts: bool,
    /// Burst radius as a fraction of the image size.
    pub burst_radius: f64,
    /// Draw the mood vignette layer.
    pub vignette: bool,
    /// Draw the danceability bubble layer.
    pub bubbles: bool,
    /// Signature pattern, if the profile has a top genre.
    pub pattern: Option<PatternType>,
}

impl RenderParameters {
    /// Derive parameters from a profile.
    pub fn from_profile(profile: &MusicProfile, tier: QualityTier) -> Self {
        let persistence = (0.4 + profile.danceability * 0.4).clamp(0.01, 0.99);

        Self {
            scale: 0.005 + profile.energy * 0.015,
            octaves: tier.octaves(),
            persistence,
            color_multiplier: if profile.valence > 0.5 { 1.2 } else { 0.8 },
            bursts: profile.energy > BURST_ENERGY_THRESHOLD,
            burst_radius: 0.1 + profile.energy * 0.2,
            vignette: profile.valence < VIGNETTE_VALENCE_THRESHOLD,
            bubbles: profile.danceability > BUBBLE_DANCEABILITY_THRESHOLD,
            pattern: profile.top_genre().and_then(PatternType::from_genre),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_profile;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_profile_parameters() {
        let params = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);

        assert!((params.scale - (0.005 + 0.629 * 0.015)).abs() < 1e-12);
        assert!((params.persistence - (0.4 + 0.795 * 0.4)).abs() < 1e-12);
        assert_eq!(params.octaves, 4);
        assert_eq!(params.color_multiplier, 0.8);
        assert!(params.bursts);
        assert!((params.burst_radius - (0.1 + 0.629 * 0.2)).abs() < 1e-12);
        assert!(!params.vignette);
        assert!(params.bubbles);
        // 'e' is 101, 101 % 4 == 1.
        assert_eq!(params.pattern, Some(PatternType::Dots));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut profile = sample_profile();
        profile.energy = 0.6;
        profile.valence = 0.4;
        profile.danceability = 0.7;
        let params = RenderParameters::from_profile(&profile, QualityTier::Standard);
        assert!(!params.bursts);
        assert!(!params.vignette);
        assert!(!params.bubbles);
    }

    #[test]
    fn test_high_valence_brightens() {
        let mut profile = sample_profile();
        profile.valence = 0.9;
        let params = RenderParameters::from_profile(&profile, QualityTier::High);
        assert_eq!(params.color_multiplier, 1.2);
        assert_eq!(params.octaves, 5);
    }

    #[test]
    fn test_pattern_from_genre() {
        assert_eq!(PatternType::from_genre("dubstep"), Some(PatternType::Lines)); // 100
        assert_eq!(PatternType::from_genre("electronic"), Some(PatternType::Dots)); // 101
        assert_eq!(PatternType::from_genre("funk"), Some(PatternType::Waves)); // 102
        assert_eq!(PatternType::from_genre("grunge"), Some(PatternType::Grid)); // 103
        assert_eq!(PatternType::from_genre(""), None);
    }

    #[test]
    fn test_pattern_uses_utf16_code_unit() {
        // U+1F3B5 encodes as the surrogate pair D83C DFB5; 0xD83C % 4 == 0.
        assert_eq!(PatternType::from_genre("\u{1F3B5}core"), Some(PatternType::Lines));
        // 'é' is U+00E9 (233), 233 % 4 == 1.
        assert_eq!(PatternType::from_genre("électro"), Some(PatternType::Dots));
    }

    #[test]
    fn test_no_genres_no_pattern() {
        let mut profile = sample_profile();
        profile.top_genres.clear();
        let params = RenderParameters::from_profile(&profile, QualityTier::Standard);
        assert_eq!(params.pattern, None);
    }

    #[test]
    fn test_out_of_range_danceability_keeps_persistence_open() {
        let mut profile = sample_profile();
        profile.danceability = 3.0;
        let high = RenderParameters::from_profile(&profile, QualityTier::Standard);
        assert!(high.persistence < 1.0);

        profile.danceability = -3.0;
        let low = RenderParameters::from_profile(&profile, QualityTier::Standard);
        assert!(low.persistence > 0.0);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let a = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);
        let b = RenderParameters::from_profile(&sample_profile(), QualityTier::Standard);
        assert_eq!(a, b);
    }
}
