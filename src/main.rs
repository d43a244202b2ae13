//! Squarizer - make images square by padding the smaller dimension symmetrically.
//!
//! SVG inputs get a square viewBox and their visible content wrapped in a
//! translated group; PNG/JPEG inputs are pasted onto a transparent square canvas.

mod cli;
mod config;
mod error;
mod image;
mod logger;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::SquarizeConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // supports-colors decides per stream
    }
    logger::set_verbose(cli.verbose);

    let config = SquarizeConfig::from_cli(&cli)?;
    let summary = cli::squarize::run(&config);

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
