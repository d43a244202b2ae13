//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::DEFAULT_SUFFIX;

const EXAMPLES: &str = "\
Examples:
  squarizer logo.svg                    # Creates logo_sq.svg
  squarizer logo.svg -o square.svg      # Custom output name
  squarizer logo.png -r 512             # Square PNG downsampled to 512x512
  squarizer logo.svg logo.png           # Process multiple files";

/// Squarizer - make images square by padding symmetrically
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Input image file(s) (SVG, PNG or JPEG)
    #[arg(required = true, num_args = 1.., value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Output file path (only works with single input)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Resample to SIZE x SIZE pixels (PNG/JPEG only)
    #[arg(short, long, value_name = "SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    pub resolution: Option<u32>,

    /// Suffix to add to the filename
    #[arg(short, long, default_value = DEFAULT_SUFFIX, allow_hyphen_values = true)]
    pub suffix: String,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
