//! Loading JSON inputs from disk.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use sonoprint_render::MusicProfile;

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Load a music profile.
pub fn load_profile(path: &Path) -> Result<MusicProfile> {
    load_json(path)
}
