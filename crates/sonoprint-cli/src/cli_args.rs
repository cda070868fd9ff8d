//! CLI argument definitions for the Sonoprint command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Sonoprint - Musical Fingerprint Images
#[derive(Parser)]
#[command(name = "sonoprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a profile to a PNG fingerprint
    Render {
        /// Path to the music profile JSON
        #[arg(short, long)]
        profile: String,

        /// Output PNG path
        #[arg(short, long)]
        out: String,

        /// Image edge length in pixels
        #[arg(long, default_value_t = 400)]
        size: u32,

        /// Quality tier (standard, high)
        #[arg(long, default_value = "standard", value_parser = ["standard", "high"])]
        tier: String,

        /// Append a JSON report line to this file
        #[arg(long)]
        telemetry: Option<String>,
    },

    /// Show the seed, render parameters and layers of a profile
    Inspect {
        /// Path to the music profile JSON
        #[arg(short, long)]
        profile: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render breathing animation frames
    Animate {
        /// Path to the music profile JSON
        #[arg(short, long)]
        profile: String,

        /// Directory to write frame_NNNN.png files into
        #[arg(long)]
        out_dir: String,

        /// Number of frames
        #[arg(long, default_value_t = 30)]
        frames: u32,

        /// Image edge length in pixels
        #[arg(long, default_value_t = 200)]
        size: u32,
    },

    /// Build a profile from per-track audio features
    Aggregate {
        /// Path to the listening data JSON
        #[arg(short, long)]
        features: String,

        /// Output profile JSON path
        #[arg(short, long)]
        out: String,
    },
}
