//! Aggregate command implementation
//!
//! Builds a music profile from raw listening data: per-track audio features,
//! the listener's top artists and an optional listener context.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use sonoprint_render::{
    aggregate_profile, extract_top_genres, ArtistGenres, AudioFeatures, ListenerContext,
    MusicProfile,
};

use crate::input::load_json;

/// Listening data accepted by `aggregate`.
#[derive(Debug, Deserialize)]
pub struct ListeningData {
    #[serde(default)]
    pub tracks: Vec<AudioFeatures>,
    #[serde(default)]
    pub artists: Vec<ArtistGenres>,
    #[serde(default)]
    pub listener: ListenerContext,
}

impl ListeningData {
    pub fn to_profile(&self) -> MusicProfile {
        let genres = extract_top_genres(&self.artists);
        aggregate_profile(&self.tracks, genres, &self.listener)
    }
}

/// Run the aggregate command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(features_path: &str, out_path: &str) -> Result<ExitCode> {
    let data: ListeningData = load_json(Path::new(features_path))?;
    let profile = data.to_profile();

    let json = serde_json::to_string_pretty(&profile)?;
    fs::write(out_path, json).with_context(|| format!("Failed to write profile: {}", out_path))?;

    println!(
        "{} {} ({} tracks, {} genres)",
        "Wrote".green().bold(),
        out_path,
        data.tracks.len(),
        profile.top_genres.len()
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listening_data_defaults() {
        let data: ListeningData = serde_json::from_str("{}").unwrap();
        let profile = data.to_profile();
        assert_eq!(profile.energy, 0.5);
        assert!(profile.top_genres.is_empty());
        assert_eq!(profile.color_palette.len(), 4);
    }

    #[test]
    fn test_listening_data_genres() {
        let data: ListeningData = serde_json::from_str(
            r#"{
                "tracks": [{"energy": 0.9, "valence": 0.1, "danceability": 0.8,
                            "acousticness": 0.0, "tempo": 170}],
                "artists": [{"name": "A", "genres": ["drum and bass", "jungle"]},
                            {"name": "B", "genres": ["jungle"]}],
                "listener": {"id": "x1", "timestamp": 1700000000000}
            }"#,
        )
        .unwrap();
        let profile = data.to_profile();
        assert_eq!(profile.top_genres, vec!["jungle", "drum and bass"]);
        assert!(profile.image_seed.is_some());
    }
}
