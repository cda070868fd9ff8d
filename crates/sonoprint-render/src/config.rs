//! Synthesis options.

use serde::{Deserialize, Serialize};

use crate::noise::GradientNoise;
use crate::png::PngConfig;

/// Precision tier: trades detail for cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// 256 gradients, 4 octaves.
    #[default]
    Standard,
    /// 1024 gradients, 5 octaves.
    High,
}

impl QualityTier {
    /// Size of the gradient palette for this tier.
    pub fn gradient_table_size(&self) -> usize {
        match self {
            QualityTier::Standard => GradientNoise::STANDARD_TABLE,
            QualityTier::High => GradientNoise::HIGH_TABLE,
        }
    }

    /// Number of fractal octaves for this tier.
    pub fn octaves(&self) -> u8 {
        match self {
            QualityTier::Standard => 4,
            QualityTier::High => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Standard => "standard",
            QualityTier::High => "high",
        }
    }
}

impl std::str::FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(QualityTier::Standard),
            "high" => Ok(QualityTier::High),
            other => Err(format!("unknown quality tier '{}' (expected standard or high)", other)),
        }
    }
}

/// PNG compression presets. Every preset is deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PngPreset {
    #[default]
    Default,
    Fast,
    Best,
}

impl PngPreset {
    pub fn config(&self) -> PngConfig {
        match self {
            PngPreset::Default => PngConfig::default(),
            PngPreset::Fast => PngConfig::fast(),
            PngPreset::Best => PngConfig::best_compression(),
        }
    }
}

/// Options for an [`ImageSynthesizer`](crate::ImageSynthesizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Precision tier.
    pub tier: QualityTier,
    /// Maximum memoized noise lookups per render pass. Zero disables the cache.
    pub cache_capacity: usize,
    /// PNG encoding preset for the still image.
    pub png: PngPreset,
}

impl SynthesisOptions {
    pub const DEFAULT_CACHE_CAPACITY: usize = 65_536;

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            tier: QualityTier::Standard,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            png: PngPreset::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tiers_match_documented_constants() {
        assert_eq!(QualityTier::Standard.gradient_table_size(), 256);
        assert_eq!(QualityTier::Standard.octaves(), 4);
        assert_eq!(QualityTier::High.gradient_table_size(), 1024);
        assert_eq!(QualityTier::High.octaves(), 5);
    }

    #[test]
    fn options_from_partial_json() {
        let options = SynthesisOptions::from_json(r#"{"tier": "high"}"#).unwrap();
        assert_eq!(
            options,
            SynthesisOptions {
                tier: QualityTier::High,
                ..SynthesisOptions::default()
            }
        );
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<QualityTier>(), Ok(QualityTier::High));
        assert!("ultra".parse::<QualityTier>().is_err());
    }
}
