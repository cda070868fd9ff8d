//! Shared fixtures for unit tests.

use crate::profile::MusicProfile;

/// The reference "electronic" listener rendered throughout the tests.
pub(crate) fn sample_profile() -> MusicProfile {
    MusicProfile {
        energy: 0.629,
        valence: 0.428,
        danceability: 0.795,
        acousticness: 0.017,
        top_genres: vec!["electronic".to_string()],
        unique_score: 62.0,
        color_palette: vec![
            "hsl(200,80%,50%)".to_string(),
            "hsl(280,70%,45%)".to_string(),
            "hsl(340,75%,55%)".to_string(),
            "hsl(40,60%,40%)".to_string(),
        ],
        image_seed: Some(123_456_789.0),
        session_nonce: None,
    }
}
