//! Building a [`MusicProfile`] from per-track listening data.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::profile::{MusicProfile, SEED_SPREAD};

/// Number of genres kept by [`extract_top_genres`].
pub const TOP_GENRE_COUNT: usize = 5;

/// Audio features of one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
    pub acousticness: f64,
    /// Beats per minute.
    pub tempo: f64,
}

/// An artist and their genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistGenres {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Who is listening, and when.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListenerContext {
    #[serde(default)]
    pub id: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

/// Most frequent genres across artists, most common first.
///
/// Ties keep the order in which genres were first seen.
pub fn extract_top_genres(artists: &[ArtistGenres]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        let count = counts.entry(genre.as_str()).or_insert(0);
        if *count == 0 {
            order.push(genre.as_str());
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(TOP_GENRE_COUNT)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Averages {
    energy: f64,
    valence: f64,
    danceability: f64,
    acousticness: f64,
    tempo: f64,
}

impl Averages {
    fn of(features: &[AudioFeatures]) -> Self {
        if features.is_empty() {
            return Self {
                energy: 0.5,
                valence: 0.5,
                danceability: 0.5,
                acousticness: 0.3,
                tempo: 120.0,
            };
        }
        let n = features.len() as f64;
        let mean = |f: fn(&AudioFeatures) -> f64| features.iter().map(f).sum::<f64>() / n;
        Self {
            energy: mean(|t| t.energy),
            valence: mean(|t| t.valence),
            danceability: mean(|t| t.danceability),
            acousticness: mean(|t| t.acousticness),
            tempo: mean(|t| t.tempo),
        }
    }
}

fn palette(avg: &Averages) -> Vec<String> {
    let Averages {
        energy: e,
        valence: v,
        danceability: d,
        acousticness: a,
        ..
    } = *avg;
    vec![
        format!(
            "hsl({}, 80%, {}%)",
            (240.0 - e * 240.0).floor(),
            (40.0 + v * 30.0).floor()
        ),
        format!(
            "hsl({}, 80%, {}%)",
            (60.0 + 160.0 * (1.0 - v)).floor(),
            (45.0 + e * 25.0).floor()
        ),
        format!(
            "hsl({}, 70%, {}%)",
            (120.0 + (300.0 * d) % 360.0).floor(),
            (50.0 + v * 20.0).floor()
        ),
        format!(
            "hsl({}, {}%, {}%)",
            (30.0 + 150.0 * a).floor(),
            (60.0 + e * 30.0).floor(),
            (40.0 + v * 30.0).floor()
        ),
    ]
}

fn uniqueness_factors(avg: &Averages, listener: &ListenerContext) -> [f64; 7] {
    let id_factor = listener
        .id
        .encode_utf16()
        .next()
        .map_or(0.0, |code| (code % 100) as f64 / 100.0 * 37.43);
    [
        avg.energy * 17.31,
        avg.valence * 19.47,
        avg.danceability * 23.89,
        avg.acousticness * 29.71,
        avg.tempo / 200.0 * 31.37,
        id_factor,
        (listener.timestamp % 10_000) as f64 / 10_000.0 * 41.59,
    ]
}

/// Build a profile from a listener's tracks and top genres.
///
/// With no tracks the features fall back to neutral defaults. The seed mixes
/// in the listener's id and timestamp, so each session gets its own image.
pub fn aggregate_profile(
    features: &[AudioFeatures],
    top_genres: Vec<String>,
    listener: &ListenerContext,
) -> MusicProfile {
    let avg = Averages::of(features);
    let factors = uniqueness_factors(&avg, listener);

    let unique_score = factors.iter().fold(0.0, |acc, f| (acc + f) % 100.0).floor();
    let spread = factors.iter().map(|f| f * PI).sum::<f64>() + listener.timestamp as f64;

    MusicProfile {
        energy: avg.energy,
        valence: avg.valence,
        danceability: avg.danceability,
        acousticness: avg.acousticness,
        top_genres,
        unique_score,
        color_palette: palette(&avg),
        image_seed: Some(spread.sin().abs() * SEED_SPREAD),
        session_nonce: None,
    }
}
