//! Sonoprint CLI - Command-line interface for musical fingerprint images
//!
//! This binary renders, inspects and animates fingerprints from music
//! profiles, and builds profiles from raw listening data.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use sonoprint_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Commands::Render {
            profile,
            out,
            size,
            tier,
            telemetry,
        } => commands::render::run(&profile, &out, size, &tier, telemetry.as_deref()),
        Commands::Inspect { profile, json } => commands::inspect::run(&profile, json),
        Commands::Animate {
            profile,
            out_dir,
            frames,
            size,
        } => commands::animate::run(&profile, &out_dir, frames, size),
        Commands::Aggregate { features, out } => commands::aggregate::run(&features, &out),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
