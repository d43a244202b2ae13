//! Run configuration built from command-line flags.
//!
//! Nothing is read from or written to disk: [`SquarizeConfig`] is the
//! validated, immutable view of [`Cli`] that the driver works from.

mod error;

pub use error::ConfigError;

use std::path::PathBuf;

use crate::cli::Cli;

/// Default filename suffix for derived output paths.
pub const DEFAULT_SUFFIX: &str = "_sq";

/// Validated options for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquarizeConfig {
    /// Input files, processed in this order.
    pub inputs: Vec<PathBuf>,
    /// Explicit output path (single input only).
    pub output: Option<PathBuf>,
    /// Final raster size (SIZE x SIZE); ignored for SVG.
    pub resolution: Option<u32>,
    /// Inserted between stem and extension for derived output paths.
    pub suffix: String,
}

impl SquarizeConfig {
    /// Validate parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::new(
            cli.inputs.clone(),
            cli.output.clone(),
            cli.resolution,
            cli.suffix.clone(),
        )
    }

    pub fn new(
        inputs: Vec<PathBuf>,
        output: Option<PathBuf>,
        resolution: Option<u32>,
        suffix: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        if output.is_some() && inputs.len() > 1 {
            return Err(ConfigError::OutputWithMultipleInputs(inputs.len()));
        }
        if resolution == Some(0) {
            return Err(ConfigError::ZeroResolution);
        }

        Ok(Self {
            inputs,
            output,
            resolution,
            suffix: suffix.into(),
        })
    }
}
