//! The music-taste profile that drives a fingerprint.

use std::f64::consts::PI;

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Color;
use crate::error::SynthesisError;

/// Upper bound of the derived seed range.
pub const SEED_SPREAD: f64 = 9_999_999_999.0;

/// Minimum number of palette entries a profile must carry.
pub const PALETTE_STOPS: usize = 4;

/// Numeric fields absent from the input or given as `null` read as NaN, so
/// [`MusicProfile::validate`] reports them like any other non-finite value.
fn unset() -> f64 {
    f64::NAN
}

fn nullable<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Aggregate listening-taste features of one listener.
///
/// Field names serialize in camelCase (`topGenres`, `imageSeed`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicProfile {
    /// Semantically in [0, 1]; not clamped.
    #[serde(default = "unset", deserialize_with = "nullable")]
    pub energy: f64,
    /// Semantically in [0, 1]; not clamped.
    #[serde(default = "unset", deserialize_with = "nullable")]
    pub valence: f64,
    /// Semantically in [0, 1]; not clamped.
    #[serde(default = "unset", deserialize_with = "nullable")]
    pub danceability: f64,
    /// Semantically in [0, 1]; not clamped.
    #[serde(default = "unset", deserialize_with = "nullable")]
    pub acousticness: f64,
    /// Genres in rank order. May be empty.
    #[serde(default)]
    pub top_genres: Vec<String>,
    /// Intended range [0, 100].
    #[serde(default = "unset", deserialize_with = "nullable")]
    pub unique_score: f64,
    /// CSS colors; the first four are the background gradient stops.
    pub color_palette: Vec<String>,
    /// Explicit high-precision seed. Derived from the features when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_seed: Option<f64>,
    /// Opt-in session uniqueness: mixed into the derived seed when
    /// `image_seed` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_nonce: Option<u64>,
}

/// Where a fingerprint's seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// `image_seed` was supplied.
    Explicit,
    /// Derived from the features alone; reproducible.
    Derived,
    /// Derived from the features and the session nonce.
    Session,
}

impl MusicProfile {
    /// Check that every numeric field is finite and the palette has enough
    /// entries. Does not parse colors; see [`MusicProfile::palette`].
    pub fn validate(&self) -> Result<(), SynthesisError> {
        let fields = [
            ("energy", self.energy),
            ("valence", self.valence),
            ("danceability", self.danceability),
            ("acousticness", self.acousticness),
            ("uniqueScore", self.unique_score),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SynthesisError::IncompleteMusicProfile { field });
            }
        }
        if let Some(seed) = self.image_seed {
            if !seed.is_finite() {
                return Err(SynthesisError::IncompleteMusicProfile { field: "imageSeed" });
            }
        }
        if self.color_palette.len() < PALETTE_STOPS {
            return Err(SynthesisError::InsufficientPalette {
                found: self.color_palette.len(),
            });
        }
        Ok(())
    }

    /// Parse every palette entry.
    pub fn palette(&self) -> Result<Vec<Color>, SynthesisError> {
        if self.color_palette.len() < PALETTE_STOPS {
            return Err(SynthesisError::InsufficientPalette {
                found: self.color_palette.len(),
            });
        }
        self.color_palette
            .iter()
            .enumerate()
            .map(|(index, text)| {
                text.parse::<Color>()
                    .map_err(|source| SynthesisError::InvalidColor { index, source })
            })
            .collect()
    }

    /// The seed this profile renders with, and where it came from.
    ///
    /// Without an explicit seed, energy, valence, danceability and score are
    /// weighted by distinct prime-ish factors and spread with
    /// `|sin(x·π)| · SEED_SPREAD` so near-identical profiles still land far
    /// apart.
    pub fn resolve_seed(&self) -> (f64, SeedSource) {
        if let Some(seed) = self.image_seed {
            return (seed, SeedSource::Explicit);
        }

        let mut combined = self.energy * 17.31
            + self.valence * 19.47
            + self.danceability * 23.89
            + self.unique_score * 31.37;

        let source = match self.session_nonce {
            Some(nonce) => {
                combined += (nonce % 10_000) as f64 / 10_000.0 * 41.59;
                SeedSource::Session
            }
            None => SeedSource::Derived,
        };

        ((combined * PI).sin().abs() * SEED_SPREAD, source)
    }

    /// The highest-ranked genre, if any.
    pub fn top_genre(&self) -> Option<&str> {
        self.top_genres.first().map(String::as_str)
    }
}
