//! Animate command implementation
//!
//! Writes breathing-animation frames as numbered PNG files.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sonoprint_render::{BreathingAnimation, ImageSynthesizer};

use crate::input::load_profile;

/// File name of frame `n`.
pub fn frame_file_name(frame: u32) -> String {
    format!("frame_{:04}.png", frame)
}

/// Render `frames` frames into `out_dir`, returning the written paths.
pub fn write_frames(
    animation: &BreathingAnimation,
    out_dir: &Path,
    frames: u32,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let synthesizer = ImageSynthesizer::default();
    let mut written = Vec::with_capacity(frames as usize);
    for (n, fingerprint) in (0..frames).zip(animation.frames(&synthesizer, frames)) {
        let fingerprint = fingerprint.with_context(|| format!("Failed to synthesize frame {}", n))?;
        let path = out_dir.join(frame_file_name(n));
        fs::write(&path, &fingerprint.image().bytes)
            .with_context(|| format!("Failed to write frame: {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Run the animate command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(profile_path: &str, out_dir: &str, frames: u32, size: u32) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let animation = BreathingAnimation::new(profile, size);
    let written = write_frames(&animation, Path::new(out_dir), frames)?;

    println!(
        "{} {} frames to {}",
        "Wrote".green().bold(),
        written.len(),
        out_dir
    );
    Ok(ExitCode::SUCCESS)
}
