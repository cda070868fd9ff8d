//! Render command implementation
//!
//! Synthesizes a profile's fingerprint and writes it as a PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;

use sonoprint_render::{ImageSynthesizer, JsonLinesSink, QualityTier, SynthesisOptions};

use crate::input::load_profile;

/// Run the render command
///
/// # Arguments
/// * `profile_path` - Path to the music profile JSON
/// * `out_path` - Output PNG path
/// * `size` - Image edge length in pixels
/// * `tier` - Quality tier name
/// * `telemetry_path` - Optional JSON lines file receiving a report
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    profile_path: &str,
    out_path: &str,
    size: u32,
    tier: &str,
    telemetry_path: Option<&str>,
) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let tier = tier.parse::<QualityTier>().map_err(anyhow::Error::msg)?;
    let synthesizer = ImageSynthesizer::new(SynthesisOptions::default().with_tier(tier));

    let fingerprint = match telemetry_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open telemetry file: {}", path))?;
            let mut sink = JsonLinesSink::new(file);
            synthesizer.synthesize_with_sink(&profile, size, &mut sink)
        }
        None => synthesizer.synthesize(&profile, size),
    }
    .with_context(|| format!("Failed to synthesize {}", profile_path))?;

    let image = fingerprint.image();
    fs::write(out_path, &image.bytes)
        .with_context(|| format!("Failed to write PNG: {}", out_path))?;

    println!("{} {}", "Wrote".green().bold(), out_path);
    println!("  {} {}x{}", "Size:".dimmed(), image.width, image.height);
    println!("  {} {}", "Seed:".dimmed(), fingerprint.seed());
    println!("  {} {}", "Hash:".dimmed(), &image.hash[..16]);

    Ok(ExitCode::SUCCESS)
}
