//! Inspect command implementation
//!
//! Prints what a profile would render: its seed, the mapped parameters and
//! the layers that would be drawn. Nothing is written to disk.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use sonoprint_render::{
    compose::{self, LayerInputs},
    LayerKind, MusicProfile, QualityTier, RenderParameters, SeedSource,
};

use crate::input::load_profile;

/// What `inspect` reports about a profile.
#[derive(Debug, Serialize)]
pub struct Inspection {
    pub seed: f64,
    pub seed_source: SeedSource,
    pub parameters: RenderParameters,
    pub layers: Vec<LayerKind>,
}

/// Work out the seed, parameters and layers of a profile without drawing.
pub fn inspect(profile: &MusicProfile, tier: QualityTier) -> Result<Inspection> {
    profile.validate()?;
    let palette = profile.palette()?;
    let (seed, seed_source) = profile.resolve_seed();
    let parameters = RenderParameters::from_profile(profile, tier);

    let commands = compose::plan(&LayerInputs {
        size: 1,
        seed,
        palette: &palette,
        params: &parameters,
    });
    let layers = compose::layer_kinds(&commands);

    Ok(Inspection {
        seed,
        seed_source,
        parameters,
        layers,
    })
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(profile_path: &str, json_output: bool) -> Result<ExitCode> {
    let profile = load_profile(Path::new(profile_path))?;
    let inspection = inspect(&profile, QualityTier::Standard)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(ExitCode::SUCCESS);
    }

    let p = &inspection.parameters;
    println!("{}", "Fingerprint:".cyan().bold());
    println!(
        "  {} {} ({:?})",
        "Seed:".dimmed(),
        inspection.seed,
        inspection.seed_source
    );
    println!("  {} {:.4}", "Scale:".dimmed(), p.scale);
    println!("  {} {}", "Octaves:".dimmed(), p.octaves);
    println!("  {} {:.3}", "Persistence:".dimmed(), p.persistence);
    println!("  {} {}", "Color gain:".dimmed(), p.color_multiplier);
    println!(
        "  {} {}",
        "Pattern:".dimmed(),
        p.pattern.map(|t| t.name()).unwrap_or("none")
    );

    println!("\n{}", "Layers:".cyan().bold());
    for (i, layer) in inspection.layers.iter().enumerate() {
        println!("  {}. {}", i + 1, layer.name());
    }

    Ok(ExitCode::SUCCESS)
}
